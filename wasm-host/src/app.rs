//! Demo application: a small notes pad driven entirely through the host.
//!
//! On mount it asks the host for the saved notes; Save, Forget and Export
//! become storage and export requests; "Go" scrolls to a numbered line.

use std::rc::Rc;

use page_host::{Request, Response};
use yew::prelude::*;

use crate::bootstrap::HostLink;
use crate::components::{EditorPanel, LinesPanel};

/// Storage key the notes are saved under.
pub const NOTES_KEY: &str = "page-host.notes";

/// DOM id of the `n`th (1-based) rendered line.
pub fn line_id(n: usize) -> String {
    format!("line-{}", n)
}

/// Parse the jump-to field into a line number within `1..=line_count`.
pub fn parse_jump(input: &str, line_count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=line_count).contains(&n).then_some(n)
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub link: HostLink,
}

impl From<HostLink> for AppProps {
    fn from(link: HostLink) -> Self {
        Self { link }
    }
}

/// Notes state.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct NotesState {
    /// Text in the editor.
    pub text: String,
    /// Text as last saved or loaded; `None` if nothing is stored.
    pub saved: Option<String>,
    /// Whether the stored notes have been read back yet.
    pub loaded: bool,
    pub jump: String,
    pub status: String,
}

impl NotesState {
    pub fn dirty(&self) -> bool {
        self.saved.as_deref().unwrap_or("") != self.text
    }
}

pub enum NotesAction {
    Edit(String),
    /// Storage answer for [`NOTES_KEY`].
    Loaded(Option<String>),
    Saved,
    Forgotten,
    Exported,
    SetJump(String),
    BadJump,
}

impl Reducible for NotesState {
    type Action = NotesAction;

    fn reduce(self: Rc<Self>, action: NotesAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NotesAction::Edit(text) => next.text = text,
            NotesAction::Loaded(value) => {
                // Don't clobber anything typed before the answer arrived.
                if !next.loaded && next.text.is_empty() {
                    next.text = value.clone().unwrap_or_default();
                }
                next.status = match &value {
                    Some(_) => "Loaded saved notes".to_string(),
                    None => "No saved notes".to_string(),
                };
                next.saved = value;
                next.loaded = true;
            }
            NotesAction::Saved => {
                next.saved = Some(next.text.clone());
                next.status = "Saved".to_string();
            }
            NotesAction::Forgotten => {
                next.saved = None;
                next.status = "Saved notes removed".to_string();
            }
            NotesAction::Exported => next.status = "Exported to a new tab".to_string(),
            NotesAction::SetJump(jump) => next.jump = jump,
            NotesAction::BadJump => {
                next.status = format!("No line {}", next.jump.trim());
            }
        }
        next.into()
    }
}

/// Main application component.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let state = use_reducer(NotesState::default);

    // Subscribe once, then ask for the saved notes.
    {
        let link = props.link.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            link.responses.subscribe(move |response| match response {
                Response::StorageGetResult { key, value } if key == NOTES_KEY => {
                    dispatcher.dispatch(NotesAction::Loaded(value));
                }
                _ => {}
            });
            link.send(Request::storage_get(NOTES_KEY));
        });
    }

    let on_change = {
        let state = state.clone();
        Callback::from(move |text: String| state.dispatch(NotesAction::Edit(text)))
    };

    let on_save = {
        let state = state.clone();
        let link = props.link.clone();
        Callback::from(move |_| {
            link.send(Request::storage_set(NOTES_KEY, state.text.clone()));
            state.dispatch(NotesAction::Saved);
        })
    };

    let on_forget = {
        let state = state.clone();
        let link = props.link.clone();
        Callback::from(move |_| {
            link.send(Request::storage_remove(NOTES_KEY));
            state.dispatch(NotesAction::Forgotten);
        })
    };

    let on_export = {
        let state = state.clone();
        let link = props.link.clone();
        Callback::from(move |_| {
            link.send(Request::export(state.text.clone()));
            state.dispatch(NotesAction::Exported);
        })
    };

    let on_jump_change = {
        let state = state.clone();
        Callback::from(move |jump: String| state.dispatch(NotesAction::SetJump(jump)))
    };

    let on_jump = {
        let state = state.clone();
        let link = props.link.clone();
        Callback::from(move |_| match parse_jump(&state.jump, state.text.lines().count()) {
            Some(n) => link.send(Request::scroll_to(line_id(n))),
            None => state.dispatch(NotesAction::BadJump),
        })
    };

    html! {
        <div class="app">
            <header class="header">
                <h1>{ "Notes" }</h1>
                if !state.loaded {
                    <span class="status">{ "Loading..." }</span>
                } else if !state.status.is_empty() {
                    <span class="status">{ &state.status }</span>
                }
            </header>

            <main class="main">
                <div class="panels">
                    <EditorPanel
                        value={state.text.clone()}
                        dirty={state.dirty()}
                        {on_change}
                        {on_save}
                        {on_forget}
                        {on_export}
                    />
                    <LinesPanel
                        text={state.text.clone()}
                        jump={state.jump.clone()}
                        {on_jump_change}
                        {on_jump}
                    />
                </div>
            </main>
        </div>
    }
}
