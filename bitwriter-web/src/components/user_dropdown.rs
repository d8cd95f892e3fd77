use shared::UserIdentity;
use yew::prelude::*;

#[derive(yew::Properties, PartialEq)]
pub struct UserDropdownProps {
    pub user: UserIdentity,
    pub open: bool,
    pub on_toggle: Callback<()>,
    pub on_close: Callback<()>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(UserDropdown)]
pub fn user_dropdown(props: &UserDropdownProps) -> Html {
    let badge_click = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_toggle.emit(());
        })
    };

    let logout_button = {
        let on_logout = props.on_logout.clone();
        let on_close = props.on_close.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_close.emit(());
            on_logout.emit(());
        });
        html! {
            <li><a class="text-error" {onclick}>{"Sign Out"}</a></li>
        }
    };

    html! {
        <div class={classes!("dropdown", "dropdown-end", props.open.then_some("dropdown-open"), props.class.clone())}>
            <div tabindex="0" role="button" class="btn btn-ghost btn-sm gap-2" onclick={badge_click}>
                <span class="font-semibold text-success">{"HandCash"}</span>
                <span>{ format!("@{}", props.user.handle) }</span>
                <i class="fa-solid fa-caret-down text-xs"></i>
            </div>
            if props.open {
                <ul tabIndex={0} class="dropdown-content z-[200] menu p-2 shadow bg-base-200 rounded-box w-56">
                    <li class="px-2 py-1 text-left">
                        <div class="text-sm font-semibold text-base-content">{ format!("@{}", props.user.handle) }</div>
                        <div class="text-xs text-base-content/70">{ &props.user.paymail }</div>
                    </li>
                    <div class="divider my-0"></div>
                    {logout_button}
                </ul>
            }
        </div>
    }
}
