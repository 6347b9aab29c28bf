//! Interactive face picking on a terminal

use std::io::{BufRead, Write};

use rk_extrude::{FacePicker, FaceRef, InMemoryDocument, SelectionError};

/// A pickable face with a display label
#[derive(Debug, Clone)]
pub struct FaceOption {
    pub label: String,
    pub face: FaceRef,
}

/// List the faces of every element, numbered in element order
pub fn face_options(document: &InMemoryDocument) -> Vec<FaceOption> {
    document
        .elements()
        .iter()
        .enumerate()
        .flat_map(|(position, element)| {
            (0..element.face_count()).filter_map(move |index| {
                let geometry = element.face(index)?;
                Some(FaceOption {
                    label: format!(
                        "{}:{} {} ({})",
                        position,
                        index,
                        element.name,
                        geometry.surface_name()
                    ),
                    face: FaceRef::new(element.id, index as u32),
                })
            })
        })
        .collect()
}

/// Prompts for a face number on a reader
///
/// Empty input, end of input or an unknown number cancels the pick.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
    options: Vec<FaceOption>,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W, options: Vec<FaceOption>) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    fn prompt(&mut self) -> std::io::Result<Option<String>> {
        writeln!(self.output, "Select a face:")?;
        for (n, option) in self.options.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", n, option.label)?;
        }
        write!(self.output, "Face number (empty to cancel): ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> FacePicker for PromptPicker<R, W> {
    fn designate_face(&mut self) -> Result<FaceRef, SelectionError> {
        let answer = match self.prompt() {
            Ok(Some(answer)) if !answer.is_empty() => answer,
            Ok(_) => return Err(SelectionError::NoSelection),
            Err(e) => {
                tracing::warn!("Face prompt failed: {}", e);
                return Err(SelectionError::NoSelection);
            }
        };

        match answer.parse::<usize>().ok().and_then(|n| self.options.get(n)) {
            Some(option) => Ok(option.face),
            None => {
                tracing::warn!("'{}' is not a listed face", answer);
                Err(SelectionError::NoSelection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;
    use rk_extrude::DocumentKind;

    fn prompt_picker(input: &str) -> (PromptPicker<&[u8], Vec<u8>>, Vec<FaceOption>) {
        let document = scene::seed_document(DocumentKind::Family);
        let options = face_options(&document);
        (
            PromptPicker::new(input.as_bytes(), Vec::new(), options.clone()),
            options,
        )
    }

    #[test]
    fn test_face_options_list_every_face() {
        let document = scene::seed_document(DocumentKind::Family);
        let options = face_options(&document);
        assert_eq!(options.len(), 9);
        assert!(options[0].label.starts_with("0:0 Box"));
        assert!(options[6].label.contains("cylindrical"));
    }

    #[test]
    fn test_pick_by_number() {
        let (mut picker, options) = prompt_picker("5\n");
        assert_eq!(picker.designate_face(), Ok(options[5].face));
        let printed = String::from_utf8(picker.output).unwrap();
        assert!(printed.contains("[8]"));
    }

    #[test]
    fn test_empty_input_cancels() {
        let (mut picker, _) = prompt_picker("\n");
        assert_eq!(picker.designate_face(), Err(SelectionError::NoSelection));
        let (mut picker, _) = prompt_picker("");
        assert_eq!(picker.designate_face(), Err(SelectionError::NoSelection));
    }

    #[test]
    fn test_unknown_number_cancels() {
        let (mut picker, _) = prompt_picker("42\n");
        assert_eq!(picker.designate_face(), Err(SelectionError::NoSelection));
    }
}
