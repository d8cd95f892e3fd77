use crate::services;
use shared::{EditorCommand, Menu, MenuState};
use strum::IntoEnumIterator;
use yew::prelude::*;

pub const ABOUT_NOTICE: &str = "Bitcoin Writer v1.0\n\nSecure blockchain document writing platform\n\n\u{a9} 2024 Bitcoin Writer\nBuilt on Bitcoin SV blockchain";

#[derive(Properties, PartialEq)]
pub struct TaskbarProps {
    pub menus: MenuState,
    pub authenticated: bool,
    pub on_toggle: Callback<Menu>,
    pub on_close: Callback<Menu>,
    pub on_command: Callback<EditorCommand>,
    pub on_logout: Callback<()>,
}

fn menu_button(label: Html, menu: Menu, on_toggle: &Callback<Menu>) -> Html {
    let onclick = on_toggle.reform(move |_: MouseEvent| menu);
    html! {
        <button class="btn btn-ghost btn-sm" aria-label={menu.to_string()} {onclick}>
            {label}
        </button>
    }
}

#[function_component(Taskbar)]
pub fn taskbar(props: &TaskbarProps) -> Html {
    let app_menu = {
        let about = {
            let on_close = props.on_close.clone();
            Callback::from(move |_: MouseEvent| {
                on_close.emit(Menu::App);
                services::alert(ABOUT_NOTICE);
            })
        };
        let sign_out = {
            let on_close = props.on_close.clone();
            let on_logout = props.on_logout.clone();
            Callback::from(move |_: MouseEvent| {
                on_close.emit(Menu::App);
                on_logout.emit(());
            })
        };
        html! {
            <ul class="menu dropdown-content z-[200] bg-base-200 rounded-box shadow w-56 p-2">
                <li><a onclick={about}>{"About Bitcoin Writer"}</a></li>
                if props.authenticated {
                    <div class="divider my-0"></div>
                    <li><a class="text-error" onclick={sign_out}>{"Sign Out"}</a></li>
                }
            </ul>
        }
    };

    let writer_menu = html! {
        <ul class="menu dropdown-content z-[200] bg-base-200 rounded-box shadow w-56 p-2">
            { for EditorCommand::iter().map(|command| {
                let on_close = props.on_close.clone();
                let on_command = props.on_command.clone();
                let onclick = Callback::from(move |_: MouseEvent| {
                    on_close.emit(Menu::Writer);
                    on_command.emit(command);
                });
                html! {
                    <>
                        <li><a {onclick}>{command.to_string()}</a></li>
                        if command.ends_group() {
                            <div class="divider my-0"></div>
                        }
                    </>
                }
            }) }
        </ul>
    };

    html! {
        <div class="navbar min-h-0 h-8 px-2 bg-base-300 text-sm gap-1">
            <div class={classes!("dropdown", props.menus.is_open(Menu::App).then_some("dropdown-open"))}>
                { menu_button(html! { <i class="fa-brands fa-bitcoin text-warning text-lg"></i> }, Menu::App, &props.on_toggle) }
                if props.menus.is_open(Menu::App) {
                    {app_menu}
                }
            </div>
            <div class={classes!("dropdown", props.menus.is_open(Menu::Writer).then_some("dropdown-open"))}>
                { menu_button(html! { {"Writer"} }, Menu::Writer, &props.on_toggle) }
                if props.menus.is_open(Menu::Writer) {
                    {writer_menu}
                }
            </div>
        </div>
    }
}
