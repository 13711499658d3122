//! UI components for the notes app.

use yew::prelude::*;

/// Editor panel: the notes text plus save/forget/export actions.
#[derive(Properties, PartialEq)]
pub struct EditorPanelProps {
    pub value: String,
    /// Whether the text differs from what was last saved.
    pub dirty: bool,
    pub on_change: Callback<String>,
    pub on_save: Callback<()>,
    pub on_forget: Callback<()>,
    pub on_export: Callback<()>,
}

#[function_component(EditorPanel)]
pub fn editor_panel(props: &EditorPanelProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    html! {
        <div class="panel editor-panel">
            <div class="panel-header">
                <h2>{ "Notes" }</h2>
                if props.dirty {
                    <span class="hint">{ "unsaved changes" }</span>
                }
                <div class="button-group">
                    <button class="save-button" onclick={props.on_save.reform(|_| ())}>
                        { "Save" }
                    </button>
                    <button class="forget-button" onclick={props.on_forget.reform(|_| ())}>
                        { "Forget" }
                    </button>
                    <button class="export-button" onclick={props.on_export.reform(|_| ())}>
                        { "Export" }
                    </button>
                </div>
            </div>
            <div class="panel-content">
                <textarea
                    class="notes-input"
                    value={props.value.clone()}
                    oninput={on_input}
                    spellcheck="false"
                    rows="12"
                    placeholder="One note per line..."
                />
            </div>
        </div>
    }
}

/// Numbered view of the notes with a jump-to-line control.
#[derive(Properties, PartialEq)]
pub struct LinesPanelProps {
    pub text: String,
    pub jump: String,
    pub on_jump_change: Callback<String>,
    pub on_jump: Callback<()>,
}

#[function_component(LinesPanel)]
pub fn lines_panel(props: &LinesPanelProps) -> Html {
    let on_input = {
        let on_jump_change = props.on_jump_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_jump_change.emit(target.value());
        })
    };

    let on_go = {
        let on_jump = props.on_jump.clone();
        Callback::from(move |_| {
            on_jump.emit(());
        })
    };

    html! {
        <div class="panel lines-panel">
            <div class="panel-header">
                <h2>{ "Lines" }</h2>
                <div class="button-group">
                    <input
                        type="number"
                        class="jump-input"
                        min="1"
                        value={props.jump.clone()}
                        oninput={on_input}
                    />
                    <button class="jump-button" onclick={on_go}>
                        { "Go" }
                    </button>
                </div>
            </div>
            <div class="panel-content">
                <ol class="note-lines">
                    { for props.text.lines().enumerate().map(|(idx, line)| html! {
                        <li id={crate::app::line_id(idx + 1)}>{ line }</li>
                    })}
                </ol>
            </div>
        </div>
    }
}
