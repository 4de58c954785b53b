//! Route table and guarded resolution.

use crate::auth::{Admission, AuthGuard};
use crate::models::Role;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    StartupDashboard,
    InvestorDashboard,
    StartupProfileCreate,
    InvestorProfileCreate,
    StartupProfileEdit,
    InvestorProfileEdit,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Login,
        Route::Signup,
        Route::StartupDashboard,
        Route::InvestorDashboard,
        Route::StartupProfileCreate,
        Route::InvestorProfileCreate,
        Route::StartupProfileEdit,
        Route::InvestorProfileEdit,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::StartupDashboard => "/startup-dashboard",
            Route::InvestorDashboard => "/investor-dashboard",
            Route::StartupProfileCreate => "/startup-profile-create",
            Route::InvestorProfileCreate => "/investor-profile-create",
            Route::StartupProfileEdit => "/startup-profile-edit",
            Route::InvestorProfileEdit => "/investor-profile-edit",
        }
    }

    /// Unknown paths fall back to the home page.
    pub fn from_path(path: &str) -> Route {
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Route::Home)
    }

    /// `None` for public routes; `Some(role)` for routes behind the guard.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Home | Route::Login | Route::Signup => None,
            Route::StartupDashboard | Route::StartupProfileCreate | Route::StartupProfileEdit => {
                Some(Role::Startup)
            }
            Route::InvestorDashboard
            | Route::InvestorProfileCreate
            | Route::InvestorProfileEdit => Some(Role::Investor),
        }
    }

    pub fn is_auth_page(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Startup => Route::StartupDashboard,
            Role::Investor => Route::InvestorDashboard,
        }
    }

    /// Where a freshly signed-up account lands.
    pub fn profile_create_for(role: Role) -> Route {
        match role {
            Role::Startup => Route::StartupProfileCreate,
            Role::Investor => Route::InvestorProfileCreate,
        }
    }

    pub fn profile_edit_for(role: Role) -> Route {
        match role {
            Role::Startup => Route::StartupProfileEdit,
            Role::Investor => Route::InvestorProfileEdit,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolves a requested path to the route actually shown.
pub fn resolve(path: &str, guard: &AuthGuard) -> Route {
    let route = Route::from_path(path);

    if route.is_auth_page() {
        return match guard.redirect_if_authenticated() {
            Some(target) => Route::from_path(target),
            None => route,
        };
    }

    match route.required_role() {
        None => route,
        Some(role) => match guard.require_auth(Some(role)) {
            Admission::Granted(_) => route,
            Admission::Redirect(target) => Route::from_path(target),
        },
    }
}
