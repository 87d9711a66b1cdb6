use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TokenCountProps {
    pub children: Html,
}

#[function_component(TokenCount)]
pub fn token_count(props: &TokenCountProps) -> Html {
    html! { <div class="token-count">{props.children.clone()}</div> }
}
