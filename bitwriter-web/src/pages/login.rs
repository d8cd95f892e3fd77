use yew::prelude::*;

#[derive(yew::Properties, PartialEq)]
pub struct LoginPageProps {
    #[prop_or_default]
    pub login_url: Option<String>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    html! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <div class="card-body">
                    <h2 class="card-title text-2xl">{"Sign in"}</h2>
                    <p class="text-base-content/80">
                        {"Connect your HandCash wallet to write, encrypt and publish documents."}
                    </p>
                    {
                        match &props.login_url {
                            Some(href) => html! {
                                <div class="card-actions mt-4">
                                    <a class="btn btn-warning w-full" href={href.clone()}>
                                        {"Sign in with HandCash"}
                                    </a>
                                </div>
                            },
                            None => html! {
                                <div class="alert alert-warning mt-4">
                                    <span>{"HandCash sign-in is not configured for this build."}</span>
                                </div>
                            },
                        }
                    }
                </div>
            </div>
        </div>
    }
}
