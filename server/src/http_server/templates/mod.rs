use maud::{html, Markup, Render, DOCTYPE};

pub(crate) mod posts;

pub fn head() -> Markup {
    html! {
      head {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";

        title { "IntroNus" }

        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css" crossorigin="anonymous";
        link rel="stylesheet" href="/styles/home.css";
      }
    }
}

struct NavLink {
    href: &'static str,
    text: &'static str,
}

impl Render for NavLink {
    fn render(&self) -> Markup {
        html! {
          li class="nav-item" {
            a class="nav-link" href=(self.href) { (self.text) }
          }
        }
    }
}

/// Navigation shown to signed-in users. Takes no inputs.
pub struct LoggedInNavbar;

impl Render for LoggedInNavbar {
    fn render(&self) -> Markup {
        html! {
          nav class="navbar navbar-expand-lg navbar-dark bg-dark mb-3" {
            a class="navbar-brand" href="/" { "IntroNus" }

            ul class="navbar-nav mr-auto" {
              (NavLink { href: "/", text: "Home" })
            }
          }
        }
    }
}

pub struct Banner<'a> {
    pub viewer: &'a str,
}

impl Render for Banner<'_> {
    fn render(&self) -> Markup {
        html! {
          div class="jumbotron p-3 p-md-5 text-white rounded bg-dark" {
            div class="col-md-6 px-0" {
              h1 class="display-4 font-italic" { "Welcome to IntroNus, " (self.viewer) }
              p class="lead my-3" { "Scroll down around here to find the latest school events" }
            }
          }
        }
    }
}

pub fn base(inner: Markup) -> Markup {
    html! {
      (DOCTYPE)
      html lang="en" {
        (head())

        body {
          div class="innerhome" {
            (inner)
          }
        }
      }
    }
}
