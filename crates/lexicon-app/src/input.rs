use lexicon_types::{NotebookEntry, UiEvent};

/// What a typed line turns into on the terminal side
#[derive(Debug, PartialEq)]
pub enum InputAction {
    Send(UiEvent),
    /// Shown right away, nothing is sent
    Reject(String),
}

/// Map a line typed at the prompt.
///
/// `/save`, `/open <n>`, `/close` and `/quit` stand in for the buttons of a
/// graphical front end. Everything else, including `/list` and `/add`, goes to
/// the session untouched.
pub fn map_input(line: &str, notebook: &[NotebookEntry]) -> InputAction {
    let mut tokens = line.split_whitespace();
    let command = tokens.next().map(str::to_lowercase).unwrap_or_default();

    match command.as_str() {
        "/save" => InputAction::Send(UiEvent::SaveCurrent),
        "/close" => InputAction::Send(UiEvent::CloseNotebook),
        "/quit" | "/exit" => InputAction::Send(UiEvent::Quit),
        "/open" => {
            let Some(arg) = tokens.next() else {
                return InputAction::Reject("Usage: /open <n> (see /list)".to_string());
            };
            match arg.parse::<usize>() {
                Ok(n) if n >= 1 && n <= notebook.len() => {
                    InputAction::Send(UiEvent::SelectEntry(notebook[n - 1].word.clone()))
                }
                _ => InputAction::Reject(format!(
                    "No notebook entry {arg}. The notebook has {} words.",
                    notebook.len()
                )),
            }
        }
        _ => InputAction::Send(UiEvent::Submit(line.to_string())),
    }
}
