/// How a navigation target relates to the session: `Public` renders for
/// everyone, `PublicOnly` (the login page) is for signed-out visitors, and
/// `Protected` requires an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    PublicOnly,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    RedirectToLogin,
    RedirectToHome,
}

impl RouteDecision {
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            RouteDecision::Render => None,
            RouteDecision::RedirectToLogin => Some("/login"),
            RouteDecision::RedirectToHome => Some("/home"),
        }
    }
}

/// Pure navigation decision. Every outcome is a function of these two
/// inputs; no view holds its own auth conditional.
pub fn decide(access: RouteAccess, authenticated: bool) -> RouteDecision {
    match (access, authenticated) {
        (RouteAccess::Protected, false) => RouteDecision::RedirectToLogin,
        (RouteAccess::PublicOnly, true) => RouteDecision::RedirectToHome,
        _ => RouteDecision::Render,
    }
}
