use crate::components::user_dropdown::UserDropdown;
use crate::containers::taskbar::Taskbar;
use shared::{EditorCommand, Menu, MenuState, UserIdentity};
use web_sys::window;
use yew::events::MouseEvent;
use yew::{
    Callback, Children, Html, Properties, classes, function_component, html, use_effect_with,
    use_state,
};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    #[prop_or_default]
    pub user: Option<UserIdentity>,
    #[prop_or_default]
    pub login_url: Option<String>,
    pub on_logout: Callback<()>,
    pub on_command: Callback<EditorCommand>,
}

fn sign_in_link(login_url: Option<&str>, class: &'static str) -> Html {
    match login_url {
        Some(href) => html! {
            <a class={class} href={href.to_string()}>{"Sign in with HandCash"}</a>
        },
        None => html! {
            <button class={class} disabled=true>{"Sign in with HandCash"}</button>
        },
    }
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    use_effect_with((), |_| {
        if let Some(root) = window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            root.set_attribute("data-theme", "dark").unwrap_or_default();
        }
        || {}
    });

    let menus = use_state(MenuState::default);
    let on_toggle = {
        let menus = menus.clone();
        Callback::from(move |menu: Menu| menus.set((*menus).toggled(menu)))
    };
    let on_close = {
        let menus = menus.clone();
        Callback::from(move |menu: Menu| menus.set((*menus).closed(menu)))
    };
    let dismiss = {
        let menus = menus.clone();
        Callback::from(move |_: MouseEvent| {
            let mut state = *menus;
            state.dismiss_all();
            menus.set(state);
        })
    };

    let authenticated = props.user.is_some();
    let login_url = props.login_url.as_deref();
    let mobile_open = menus.is_open(Menu::Mobile);

    let user_area = match props.user.clone() {
        Some(user) => html! {
            <UserDropdown
                {user}
                open={menus.is_open(Menu::UserDropdown)}
                on_toggle={on_toggle.reform(|()| Menu::UserDropdown)}
                on_close={on_close.reform(|()| Menu::UserDropdown)}
                on_logout={props.on_logout.clone()}
            />
        },
        None => sign_in_link(login_url, "btn btn-warning btn-sm"),
    };

    let mobile_menu = if mobile_open {
        let close = on_close.reform(|_: MouseEvent| Menu::Mobile);
        html! {
            <div class="fixed inset-y-0 left-0 z-[1000] w-72 bg-base-200 p-4 shadow-xl">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-lg font-semibold">{"Platform Features"}</h3>
                    <button class="btn btn-ghost btn-sm" aria-label="Close menu" onclick={close}>
                        <i class="fa-solid fa-xmark"></i>
                    </button>
                </div>
                if !authenticated {
                    { sign_in_link(login_url, "btn btn-warning w-full") }
                }
            </div>
        }
    } else {
        html! {}
    };

    html! {
    <>
        <Taskbar
            menus={*menus}
            {authenticated}
            on_toggle={on_toggle.clone()}
            on_close={on_close.clone()}
            on_command={props.on_command.clone()}
            on_logout={props.on_logout.clone()}
        />
        <header class="navbar justify-between bg-base-300 gap-2">
            <div class="flex items-center gap-2">
                <span
                    class={classes!("w-3", "h-3", "rounded-full", if authenticated { "bg-success" } else { "bg-neutral" })}
                    title={if authenticated { "Connected" } else { "Not connected" }}
                ></span>
                <button
                    class="btn btn-ghost btn-sm sm:hidden"
                    aria-label="Toggle menu"
                    onclick={on_toggle.reform(|_: MouseEvent| Menu::Mobile)}
                >
                    <i class="fa-solid fa-bars text-lg"></i>
                </button>
                <div>
                    <h1 class="text-xl font-bold"><span class="text-warning">{"Bitcoin"}</span>{" Writer"}</h1>
                    <p class="text-xs text-base-content/70">{"Secure, Encrypted Documents on the Blockchain"}</p>
                </div>
            </div>
            <div class="flex items-center">
                {user_area}
            </div>
        </header>
        if menus.any_open() {
            <div
                class={classes!("fixed", "inset-0", if mobile_open { "z-[999] bg-black/80" } else { "z-[100]" })}
                onclick={dismiss}
            ></div>
        }
        {mobile_menu}
        <main class="min-h-screen bg-base-100 p-4">
            {props.children.clone()}
        </main>
        <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
            <div>
                <p>{"\u{a9} 2024 Bitcoin Writer \u{b7} Built on Bitcoin SV"}</p>
            </div>
        </footer>
    </>
    }
}
