//! Path pickers
//!
//! The file, folder and save-path pickers a front end offers while composing a
//! plan. Every picker returns `None` when the user cancels.

use std::io::{self, BufRead, Write};

use log::warn;

/// Restricts which files a picker accepts, e.g. `Images: jpg, png`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Case-insensitive extension match; `*` accepts anything
    pub fn matches(&self, path: &str) -> bool {
        let ext = std::path::Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        self.extensions.iter().any(|allowed| {
            allowed == "*" || ext.as_deref() == Some(allowed.to_ascii_lowercase().as_str())
        })
    }
}

impl std::fmt::Display for FileFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.extensions.join(", "))
    }
}

/// Picks a single path, or nothing on cancel
pub trait PathPicker {
    fn select_file(&mut self, filters: &[FileFilter]) -> Option<String>;
    fn select_folder(&mut self) -> Option<String>;
    fn select_save_file(&mut self, filters: &[FileFilter]) -> Option<String>;

    /// Pick an existing file or folder: a cancelled file pick falls back to
    /// the folder picker
    fn select_any(&mut self, filters: &[FileFilter]) -> Option<String> {
        self.select_file(filters).or_else(|| self.select_folder())
    }
}

/// Line-oriented questions to the user
pub trait Prompt {
    /// Ask a question; `None` on blank input or end of input
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
    /// Yes/no question; blank input or end of input picks `default`
    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool>;
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Terminal picker reading answers from `input` and writing prompts to `output`
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn pick(&mut self, label: &str, filters: &[FileFilter]) -> Option<String> {
        match self.pick_inner(label, filters) {
            Ok(path) => path,
            Err(e) => {
                warn!("Path selection failed: {}", e);
                None
            }
        }
    }

    fn pick_inner(&mut self, label: &str, filters: &[FileFilter]) -> io::Result<Option<String>> {
        loop {
            let Some(path) = self.ask(&format!("{} (blank to cancel)", label))? else {
                return Ok(None);
            };

            if filters.is_empty() || filters.iter().any(|f| f.matches(&path)) {
                return Ok(Some(path));
            }

            let allowed: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
            self.say(&format!("{} does not match {}", path, allowed.join("; ")))?;
        }
    }
}

impl<R: BufRead, W: Write> Prompt for PromptPicker<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            match self.ask(&format!("{} [{}]", question, hint))? {
                None => return Ok(default),
                Some(answer) => match answer.to_ascii_lowercase().as_str() {
                    "y" | "yes" => return Ok(true),
                    "n" | "no" => return Ok(false),
                    _ => self.say("please answer y or n")?,
                },
            }
        }
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

impl<R: BufRead, W: Write> PathPicker for PromptPicker<R, W> {
    fn select_file(&mut self, filters: &[FileFilter]) -> Option<String> {
        self.pick("file path", filters)
    }

    fn select_folder(&mut self) -> Option<String> {
        self.pick("folder path", &[])
    }

    fn select_save_file(&mut self, filters: &[FileFilter]) -> Option<String> {
        self.pick("save as", filters)
    }

    // A typed path can already name either, so one prompt is enough.
    fn select_any(&mut self, filters: &[FileFilter]) -> Option<String> {
        self.pick("file or folder path", filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn picker(input: &str) -> PromptPicker<Cursor<Vec<u8>>, Vec<u8>> {
        PromptPicker::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn blank_line_cancels() {
        assert_eq!(picker("\n").select_folder(), None);
        assert_eq!(picker("").select_file(&[]), None);
    }

    #[test]
    fn returns_trimmed_path() {
        assert_eq!(
            picker("  /tmp/out  \n").select_save_file(&[]),
            Some("/tmp/out".to_string())
        );
    }

    #[test]
    fn filter_mismatch_reprompts() {
        let images = FileFilter::new("Images", &["jpg", "PNG"]);
        let mut p = picker("/tmp/a.txt\n/tmp/b.png\n");
        assert_eq!(p.select_file(&[images]), Some("/tmp/b.png".to_string()));

        let output = String::from_utf8(p.output).unwrap();
        assert!(output.contains("/tmp/a.txt does not match Images (jpg, PNG)"));
    }

    #[test]
    fn wildcard_filter_accepts_anything() {
        assert!(FileFilter::new("All", &["*"]).matches("/tmp/noext"));
        assert!(!FileFilter::new("Text", &["txt"]).matches("/tmp/noext"));
    }

    struct FolderOnly(Option<String>);

    impl PathPicker for FolderOnly {
        fn select_file(&mut self, _: &[FileFilter]) -> Option<String> {
            None
        }
        fn select_folder(&mut self) -> Option<String> {
            self.0.take()
        }
        fn select_save_file(&mut self, _: &[FileFilter]) -> Option<String> {
            None
        }
    }

    #[test]
    fn select_any_falls_back_to_folder() {
        let mut folders = FolderOnly(Some("/tmp/tree".into()));
        assert_eq!(folders.select_any(&[]), Some("/tmp/tree".to_string()));
        assert_eq!(folders.select_any(&[]), None);

        let mut p = picker("/tmp/tree\n");
        assert_eq!(p.select_any(&[]), Some("/tmp/tree".to_string()));
        assert!(String::from_utf8(p.output).unwrap().starts_with("file or folder path"));
    }

    #[test]
    fn confirm_uses_default_and_reasks() {
        assert!(picker("\n").confirm("recursive?", true).unwrap());
        assert!(!picker("maybe\nno\n").confirm("recursive?", true).unwrap());
        assert!(picker("YES\n").confirm("force?", false).unwrap());
    }
}
