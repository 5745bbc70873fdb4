use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, cart_count: usize, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | TitleFlow" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#524ed2"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon icon-tabler icon-tabler-file-search"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M14 3v4a1 1 0 0 0 1 1h4" {}
                      path d="M12 21h-5a2 2 0 0 1 -2 -2v-14a2 2 0 0 1 2 -2h7l5 5v4.5" {}
                      path d="M16.5 17.5m-2.5 0a2.5 2.5 0 1 0 5 0a2.5 2.5 0 1 0 -5 0" {}
                      path d="M18.5 19.5l2.5 2.5" {}
                  }
                  h3 { a href="/" { "TitleFlow" } }
                  nav {
                      ul {
                          li { a href="/" { "Search" } }
                          li { a href="/orders" { "My Orders" } }
                          li {
                              a href="/cart" id="cart-link" {
                                  "Cart"
                                  @if cart_count > 0 {
                                      " " span class="badge" { (cart_count) }
                                  }
                              }
                          }
                      }
                  }
              }
                main class="container" {
                    (content)
                }
            }
        }
    }
}
