use shared::{EditorCommand, UserIdentity};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditorPageProps {
    pub user: UserIdentity,
    pub documents_ready: bool,
    #[prop_or_default]
    pub document_owner: Option<String>,
    #[prop_or_default]
    pub last_command: Option<EditorCommand>,
}

#[function_component(EditorPage)]
pub fn editor_page(props: &EditorPageProps) -> Html {
    let status = match (props.documents_ready, props.document_owner.as_deref()) {
        (true, Some(owner)) => html! {
            <div class="badge badge-success gap-1">{ format!("Documents ready for @{owner}") }</div>
        },
        _ => html! {
            <div class="badge badge-ghost">{"Document service unavailable"}</div>
        },
    };

    html! {
        <div class="max-w-4xl mx-auto flex flex-col gap-4">
            <div class="flex items-center justify-between">
                <div>
                    <div class="text-lg font-semibold">{ format!("@{}", props.user.handle) }</div>
                    <div class="text-xs text-base-content/70">{ &props.user.paymail }</div>
                </div>
                {status}
            </div>
            <textarea
                class="textarea textarea-bordered w-full min-h-[50vh] font-mono"
                placeholder="Start writing..."
                disabled={!props.documents_ready}
            />
            if let Some(command) = props.last_command {
                <div class="text-sm text-base-content/70">{ format!("Last action: {command}") }</div>
            }
        </div>
    }
}
