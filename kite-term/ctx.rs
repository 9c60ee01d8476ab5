//! Application context: the editing session plus client-side prompt state.

use std::path::{
  Path,
  PathBuf,
};

use eyre::{
  Context,
  Result,
};
use kite_lib::{
  config::Config,
  document::Document,
  editor::{
    Editor,
    EditorOutcome,
  },
  input::{
    Key,
    KeyEvent,
  },
  search::SearchInput,
};

use crate::prompt::{
  Prompt,
  PromptEvent,
  PromptKind,
};

/// Rows taken by the status and message bars.
pub const BAR_ROWS: u16 = 2;

pub struct Ctx {
  pub editor:       Editor,
  pub prompt:       Option<Prompt>,
  pub should_quit:  bool,
  pub needs_render: bool,
}

impl Ctx {
  pub fn new(file: Option<&Path>, config: &Config) -> Result<Self> {
    let document = match file {
      Some(path) => open_document(path)?,
      None => Document::new(),
    };
    let mut editor = Editor::new(document, &config.editor);
    editor
      .messages_mut()
      .info("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");

    Ok(Self {
      editor,
      prompt: None,
      should_quit: false,
      needs_render: true,
    })
  }

  pub fn resize(&mut self, width: u16, height: u16) {
    self
      .editor
      .resize(height.saturating_sub(BAR_ROWS) as usize, width as usize);
    self.editor.scroll();
    self.needs_render = true;
  }

  pub fn handle_key(&mut self, event: KeyEvent) {
    self.needs_render = true;
    match self.prompt.take() {
      Some(prompt) => self.handle_prompt_key(prompt, event),
      None => {
        match self.editor.handle_key(event) {
          EditorOutcome::Continue => {},
          EditorOutcome::Quit => self.should_quit = true,
          EditorOutcome::SaveRequested => self.save(),
          EditorOutcome::SearchRequested => self.prompt = Some(Prompt::new(PromptKind::Search)),
        }
      },
    }
    self.editor.scroll();
  }

  fn handle_prompt_key(&mut self, mut prompt: Prompt, event: KeyEvent) {
    let result = prompt.handle_key(event);
    match prompt.kind {
      PromptKind::SaveAs => {
        match result {
          PromptEvent::Accepted => {
            self.editor.set_file_path(PathBuf::from(&prompt.input));
            self.write();
          },
          PromptEvent::Cancelled => self.editor.save_aborted(),
          PromptEvent::Edited => self.prompt = Some(prompt),
        }
      },
      PromptKind::Search => {
        let input = match (result, event.key) {
          (PromptEvent::Cancelled, _) => SearchInput::Cancel,
          (PromptEvent::Accepted, _) => SearchInput::Confirm,
          (_, Key::Right | Key::Down) => SearchInput::Next,
          (_, Key::Left | Key::Up) => SearchInput::Prev,
          _ => SearchInput::Edit,
        };
        self.editor.search(&prompt.input, input);
        if result == PromptEvent::Edited {
          self.prompt = Some(prompt);
        }
      },
    }
  }

  fn save(&mut self) {
    if self.editor.document().path().is_none() {
      self.prompt = Some(Prompt::new(PromptKind::SaveAs));
      return;
    }
    self.write();
  }

  fn write(&mut self) {
    let Some(path) = self.editor.document().path().map(Path::to_path_buf) else {
      return;
    };
    let bytes = self.editor.document().to_flat_text();
    match std::fs::write(&path, &bytes) {
      Ok(()) => self.editor.save_succeeded(bytes.len()),
      Err(err) => {
        log::error!("failed to write {}: {err}", path.display());
        self.editor.save_failed(err);
      },
    }
  }
}

/// Read `path` into a document; a file that does not exist yet opens empty.
fn open_document(path: &Path) -> Result<Document> {
  match std::fs::read(path) {
    Ok(bytes) => Ok(Document::from_bytes(&bytes, Some(path.to_path_buf()))),
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
      log::info!("{} does not exist, starting empty", path.display());
      Ok(Document::from_bytes(&[], Some(path.to_path_buf())))
    },
    Err(err) => Err(err).wrap_err_with(|| format!("failed to open {}", path.display())),
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use kite_lib::{
    position::Position,
    syntax::Highlight,
  };

  use super::*;

  fn ctx(file: Option<&Path>) -> Ctx {
    let mut ctx = Ctx::new(file, &Config::default()).unwrap();
    ctx.resize(40, 12);
    ctx
  }

  fn type_str(ctx: &mut Ctx, text: &str) {
    for ch in text.chars() {
      ctx.handle_key(KeyEvent::new(Key::Char(ch)));
    }
  }

  #[test]
  fn opens_missing_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.rs");
    let ctx = ctx(Some(&path));
    assert!(ctx.editor.document().is_empty());
    assert_eq!(ctx.editor.document().path(), Some(path.as_path()));
    assert_eq!(ctx.editor.document().profile().map(|p| p.name), Some("rust"));
  }

  #[test]
  fn save_writes_flat_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "one\r\ntwo\n").unwrap();

    let mut ctx = ctx(Some(&path));
    type_str(&mut ctx, ">");
    ctx.handle_key(KeyEvent::ctrl('s'));

    assert_eq!(fs::read(&path).unwrap(), b">one\ntwo\n");
    assert!(!ctx.editor.document().is_modified());
    let message = ctx.editor.messages().latest().unwrap();
    assert_eq!(message.text, "9 bytes written to disk");
  }

  #[test]
  fn save_as_prompts_for_a_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.c");

    let mut ctx = ctx(None);
    type_str(&mut ctx, "x");
    ctx.handle_key(KeyEvent::ctrl('s'));
    assert_eq!(ctx.prompt.as_ref().map(|p| p.kind), Some(PromptKind::SaveAs));

    type_str(&mut ctx, &path.to_string_lossy());
    ctx.handle_key(KeyEvent::new(Key::Enter));

    assert!(ctx.prompt.is_none());
    assert_eq!(fs::read(&path).unwrap(), b"x\n");
    assert_eq!(ctx.editor.document().profile().map(|p| p.name), Some("c"));
  }

  #[test]
  fn save_as_escape_aborts() {
    let mut ctx = ctx(None);
    type_str(&mut ctx, "x");
    ctx.handle_key(KeyEvent::ctrl('s'));
    ctx.handle_key(KeyEvent::new(Key::Escape));
    assert!(ctx.prompt.is_none());
    assert!(ctx.editor.document().is_modified());
    assert_eq!(ctx.editor.messages().latest().unwrap().text, "Save aborted");
  }

  #[test]
  fn save_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("a.txt");
    let mut ctx = ctx(Some(&path));
    type_str(&mut ctx, "x");
    ctx.handle_key(KeyEvent::ctrl('s'));
    assert!(ctx.editor.document().is_modified());
    assert!(
      ctx
        .editor
        .messages()
        .latest()
        .unwrap()
        .text
        .starts_with("Can't save! I/O error:")
    );
  }

  #[test]
  fn search_prompt_drives_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "alpha\nbeta\nalpha beta\n").unwrap();
    let mut ctx = ctx(Some(&path));

    ctx.handle_key(KeyEvent::ctrl('f'));
    type_str(&mut ctx, "beta");
    assert_eq!(ctx.editor.cursor(), Position::new(1, 0));
    ctx.handle_key(KeyEvent::new(Key::Down));
    assert_eq!(ctx.editor.cursor(), Position::new(2, 6));
    ctx.handle_key(KeyEvent::new(Key::Up));
    assert_eq!(ctx.editor.cursor(), Position::new(1, 0));
    assert!(
      ctx
        .editor
        .document()
        .row(1)
        .unwrap()
        .highlight()
        .contains(&Highlight::Match)
    );

    ctx.handle_key(KeyEvent::new(Key::Enter));
    assert!(ctx.prompt.is_none());
    assert_eq!(ctx.editor.cursor(), Position::new(1, 0));
    assert!(
      ctx
        .editor
        .document()
        .rows()
        .iter()
        .all(|row| !row.highlight().contains(&Highlight::Match))
    );
  }

  #[test]
  fn search_escape_restores_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "alpha\nbeta\n").unwrap();
    let mut ctx = ctx(Some(&path));
    ctx.handle_key(KeyEvent::new(Key::Right));

    ctx.handle_key(KeyEvent::ctrl('f'));
    type_str(&mut ctx, "be");
    assert_eq!(ctx.editor.cursor(), Position::new(1, 0));
    ctx.handle_key(KeyEvent::new(Key::Escape));
    assert_eq!(ctx.editor.cursor(), Position::new(0, 1));
    assert!(ctx.prompt.is_none());
  }

  #[test]
  fn quit_needs_confirmation_when_modified() {
    let mut ctx = ctx(None);
    type_str(&mut ctx, "x");
    ctx.handle_key(KeyEvent::ctrl('q'));
    ctx.handle_key(KeyEvent::ctrl('q'));
    assert!(!ctx.should_quit);
    ctx.handle_key(KeyEvent::ctrl('q'));
    assert!(ctx.should_quit);
  }
}
