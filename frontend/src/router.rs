use leptos::*;
use leptos_router::*;

use crate::{
    components::{
        guard::{RedirectIfAuthenticated, RequireAuth},
        layout::SessionExpiredBanner,
        navbar::Navbar,
    },
    pages::{HomePage, LoginPage, ProfilePage, WelcomePage},
    session::{AuthProvider, RouteAccess},
};

pub const ROUTE_PATHS: &[&str] = &["/", "/login", "/home", "/profile"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/home", "/profile"];

pub const PUBLIC_ONLY_ROUTE_PATHS: &[&str] = &["/login"];

/// Maps a path to its access class. Unknown paths are Public; they resolve
/// to the catch-all route, which sends the visitor to the welcome page.
pub fn classify(path: &str) -> RouteAccess {
    if PROTECTED_ROUTE_PATHS.contains(&path) {
        RouteAccess::Protected
    } else if PUBLIC_ONLY_ROUTE_PATHS.contains(&path) {
        RouteAccess::PublicOnly
    } else {
        RouteAccess::Public
    }
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    view! {
        <AuthProvider>
            <Router>
                <Navbar/>
                <SessionExpiredBanner/>
                <main>
                    <Routes>
                        <Route path="/" view=WelcomePage/>
                        <Route path="/login" view=GuardedLogin/>
                        <Route path="/home" view=ProtectedHome/>
                        <Route path="/profile" view=ProtectedProfile/>
                        <Route path="/*any" view=CatchAll/>
                    </Routes>
                </main>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn GuardedLogin() -> impl IntoView {
    view! { <RedirectIfAuthenticated><LoginPage/></RedirectIfAuthenticated> }
}

#[component]
fn ProtectedHome() -> impl IntoView {
    view! { <RequireAuth><HomePage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}

#[component]
fn CatchAll() -> impl IntoView {
    create_effect(|_| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    });
    view! { <></> }
}
