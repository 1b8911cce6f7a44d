//! Interactive plan builder
//!
//! Composes a plan one step at a time from terminal answers, using the path
//! pickers for every path field.

pub mod picker;

use std::io;

use crate::plan::{DeleteStep, MkdirStep, Step, TransferStep};

pub use picker::{FileFilter, PathPicker, Prompt, PromptPicker};

/// Asks for steps until the user leaves the kind blank
pub fn build_plan<T: Prompt + PathPicker>(terminal: &mut T) -> io::Result<Vec<Step>> {
    let mut steps = Vec::new();

    loop {
        let question = format!(
            "step #{} kind [mkdir/copy/move/delete, blank to finish]",
            steps.len() + 1
        );
        let Some(kind) = terminal.ask(&question)? else {
            break;
        };

        let step = match kind.to_ascii_lowercase().as_str() {
            "mkdir" => ask_mkdir(terminal)?,
            "copy" => ask_transfer(terminal)?.map(Step::Copy),
            "move" => ask_transfer(terminal)?.map(Step::Move),
            "delete" => ask_delete(terminal)?,
            other => {
                terminal.say(&format!("unknown step kind: {}", other))?;
                continue;
            }
        };

        match step {
            Some(step) => {
                terminal.say(&format!("added #{} {}", steps.len() + 1, step))?;
                steps.push(step);
            }
            None => terminal.say("step cancelled")?,
        }
    }

    Ok(steps)
}

fn ask_mkdir<T: Prompt + PathPicker>(terminal: &mut T) -> io::Result<Option<Step>> {
    let Some(path) = terminal.select_folder() else {
        return Ok(None);
    };
    let recursive = terminal.confirm("create missing parents", true)?;
    Ok(Some(Step::Mkdir(MkdirStep { path, recursive })))
}

fn ask_transfer<T: Prompt + PathPicker>(terminal: &mut T) -> io::Result<Option<TransferStep>> {
    let Some(from) = terminal.select_any(&[]) else {
        return Ok(None);
    };
    let Some(to) = terminal.select_save_file(&[]) else {
        return Ok(None);
    };
    let ensure_parent = terminal.confirm("create destination parent", true)?;
    let overwrite = terminal.confirm("overwrite existing destination", false)?;

    Ok(Some(TransferStep {
        from,
        to,
        ensure_parent,
        overwrite,
    }))
}

fn ask_delete<T: Prompt + PathPicker>(terminal: &mut T) -> io::Result<Option<Step>> {
    let Some(path) = terminal.select_any(&[]) else {
        return Ok(None);
    };
    let force = terminal.confirm("remove non-empty directories", false)?;
    Ok(Some(Step::Delete(DeleteStep { path, force })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn builds_steps_with_editor_defaults() {
        let answers = "mkdir\n/tmp/a\n\ncopy\n/tmp/src.txt\n/tmp/a/src.txt\n\n\ndelete\n/tmp/old\ny\n\n";
        let mut terminal = PromptPicker::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new());

        let steps = build_plan(&mut terminal).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Mkdir(MkdirStep {
                    path: "/tmp/a".into(),
                    recursive: true
                }),
                Step::Copy(TransferStep {
                    from: "/tmp/src.txt".into(),
                    to: "/tmp/a/src.txt".into(),
                    ensure_parent: true,
                    overwrite: false
                }),
                Step::Delete(DeleteStep {
                    path: "/tmp/old".into(),
                    force: true
                }),
            ]
        );
    }

    /// Scripted answers with a picker that can only choose folders
    struct FolderTerminal {
        answers: Vec<&'static str>,
        folders: Vec<&'static str>,
    }

    impl Prompt for FolderTerminal {
        fn ask(&mut self, _: &str) -> io::Result<Option<String>> {
            Ok(self.answers.pop().map(str::to_string))
        }
        fn confirm(&mut self, _: &str, default: bool) -> io::Result<bool> {
            Ok(default)
        }
        fn say(&mut self, _: &str) -> io::Result<()> {
            Ok(())
        }
    }

    impl PathPicker for FolderTerminal {
        fn select_file(&mut self, _: &[FileFilter]) -> Option<String> {
            None
        }
        fn select_folder(&mut self) -> Option<String> {
            self.folders.pop().map(str::to_string)
        }
        fn select_save_file(&mut self, _: &[FileFilter]) -> Option<String> {
            Some("/tmp/backup".into())
        }
    }

    #[test]
    fn folder_sources_come_from_the_folder_picker() {
        let mut terminal = FolderTerminal {
            answers: vec!["delete", "copy"],
            folders: vec!["/tmp/old", "/tmp/tree"],
        };

        let steps = build_plan(&mut terminal).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Copy(TransferStep {
                    from: "/tmp/tree".into(),
                    to: "/tmp/backup".into(),
                    ensure_parent: true,
                    overwrite: false
                }),
                Step::Delete(DeleteStep {
                    path: "/tmp/old".into(),
                    force: false
                }),
            ]
        );
    }

    #[test]
    fn unknown_kind_and_cancel_add_nothing() {
        let answers = "chmod\nmove\n\n";
        let mut terminal = PromptPicker::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new());
        assert!(build_plan(&mut terminal).unwrap().is_empty());
    }
}
