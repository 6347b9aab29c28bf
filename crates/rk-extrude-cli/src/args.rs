//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::DVec3;

#[derive(Parser, Debug)]
#[command(name = "rk-extrude")]
#[command(about = "Create a placed rectangular extrusion in a model document", long_about = None)]
pub struct Cli {
    /// RON file with extrusion settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Run against a project document instead of a family document
    #[arg(long, global = true)]
    pub project: bool,

    /// Number of times to invoke the command
    #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Print one JSON object per invocation
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sketch on a plane given by normal and origin
    Explicit {
        /// Plane normal as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        normal: DVec3,
        /// Plane origin as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,0")]
        origin: DVec3,
    },
    /// Sketch on a picked face
    Pick {
        /// Face as <element>:<face> indices; prompts on stdin when omitted
        #[arg(long, value_parser = parse_face)]
        face: Option<FaceSpec>,
    },
    /// Write the default settings as RON
    DefaultConfig {
        /// Output file (stdout when omitted)
        output: Option<PathBuf>,
    },
}

/// A face addressed by element position and face index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSpec {
    pub element: usize,
    pub face: u32,
}

fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{s}'"));
    };
    let component = |v: &str| {
        v.parse::<f64>()
            .map_err(|e| format!("invalid component '{v}': {e}"))
    };
    Ok(DVec3::new(component(x)?, component(y)?, component(z)?))
}

fn parse_face(s: &str) -> Result<FaceSpec, String> {
    let (element, face) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <element>:<face> but got '{s}'"))?;
    Ok(FaceSpec {
        element: element
            .trim()
            .parse()
            .map_err(|e| format!("invalid element index '{element}': {e}"))?,
        face: face
            .trim()
            .parse()
            .map_err(|e| format!("invalid face index '{face}': {e}"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,1,0"), Ok(DVec3::new(1.0, 1.0, 0.0)));
        assert_eq!(parse_vec3(" -1.5, 2 ,3e1"), Ok(DVec3::new(-1.5, 2.0, 30.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
    }

    #[test]
    fn test_parse_face() {
        assert_eq!(parse_face("0:5"), Ok(FaceSpec { element: 0, face: 5 }));
        assert!(parse_face("05").is_err());
        assert!(parse_face("a:1").is_err());
    }

    #[test]
    fn test_explicit_command_line() {
        let cli = Cli::try_parse_from([
            "rk-extrude",
            "explicit",
            "--normal",
            "-1,0,0",
            "--repeat",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.repeat, 2);
        assert!(!cli.project);
        match cli.command {
            Commands::Explicit { normal, origin } => {
                assert_eq!(normal, DVec3::new(-1.0, 0.0, 0.0));
                assert_eq!(origin, DVec3::ZERO);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_pick_command_line() {
        let cli = Cli::try_parse_from(["rk-extrude", "--project", "pick", "--face", "1:2"]).unwrap();
        assert!(cli.project);
        assert!(matches!(
            cli.command,
            Commands::Pick {
                face: Some(FaceSpec { element: 1, face: 2 })
            }
        ));
    }

    #[test]
    fn test_repeat_must_be_positive() {
        assert!(Cli::try_parse_from(["rk-extrude", "--repeat", "0", "pick"]).is_err());
    }
}
