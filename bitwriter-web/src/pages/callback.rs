use yew::{Html, function_component, html};

/// Shown while a HandCash redirect token is being exchanged.
#[function_component(CallbackPage)]
pub fn callback_page() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] gap-3">
            <span class="loading loading-dots loading-lg text-warning"></span>
            <span>{"Connecting to HandCash"}</span>
        </div>
    }
}
