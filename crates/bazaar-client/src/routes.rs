//! Client routes and role gating.

use bazaar_auth::{AuthSession, Role};
use bazaar_commerce::{CategoryId, SubCategoryId};
use std::fmt;
use url::Url;

/// A navigable page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Product grid, optionally narrowed to a category and subcategory.
    Home {
        category: Option<CategoryId>,
        subcategory: Option<SubCategoryId>,
    },
    Checkout,
    Login,
    Register,
    ForgotPassword,
    /// Admin customer directory.
    Customers,
}

impl Route {
    /// The unfiltered home page.
    pub fn home() -> Self {
        Route::Home {
            category: None,
            subcategory: None,
        }
    }

    /// Home page filtered by category.
    pub fn category(category: CategoryId, subcategory: Option<SubCategoryId>) -> Self {
        Route::Home {
            category: Some(category),
            subcategory,
        }
    }

    /// Path without query string.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home { .. } => "/",
            Route::Checkout => "/checkout",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::Customers => "/admin/customers",
        }
    }

    /// Minimum role needed to open this route.
    pub fn required_role(&self) -> Role {
        match self {
            Route::Customers => Role::Admin,
            _ => Role::Guest,
        }
    }

    /// Parse a path with optional `category`/`subcategory` query.
    ///
    /// Unknown paths yield `None`.
    pub fn parse(location: &str) -> Option<Self> {
        let url = Url::parse("http://storefront.local/").ok()?.join(location).ok()?;
        let route = match url.path().trim_end_matches('/') {
            "" => {
                let mut category = None;
                let mut subcategory = None;
                for (key, value) in url.query_pairs() {
                    if value.is_empty() {
                        continue;
                    }
                    match key.as_ref() {
                        "category" => category = Some(CategoryId::new(value.into_owned())),
                        "subcategory" => subcategory = Some(SubCategoryId::new(value.into_owned())),
                        _ => {}
                    }
                }
                Route::Home {
                    category,
                    subcategory,
                }
            }
            "/checkout" => Route::Checkout,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/forgot-password" => Route::ForgotPassword,
            "/admin/customers" => Route::Customers,
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home {
                category,
                subcategory,
            } => {
                let mut query = url::form_urlencoded::Serializer::new(String::new());
                if let Some(category) = category {
                    query.append_pair("category", category.as_str());
                }
                if let Some(subcategory) = subcategory {
                    query.append_pair("subcategory", subcategory.as_str());
                }
                let query = query.finish();
                if query.is_empty() {
                    f.write_str("/")
                } else {
                    write!(f, "/?{}", query)
                }
            }
            other => f.write_str(other.path()),
        }
    }
}

/// Outcome of opening a role-gated view.
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Allowed(T),
    /// The role check failed; nothing was fetched.
    Redirect(Route),
}

impl<T> Gated<T> {
    pub fn allowed(self) -> Option<T> {
        match self {
            Gated::Allowed(value) => Some(value),
            Gated::Redirect(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<&Route> {
        match self {
            Gated::Allowed(_) => None,
            Gated::Redirect(route) => Some(route),
        }
    }
}

/// Where navigating to `route` actually lands.
///
/// Admin-only routes send everyone else to Home.
pub fn guard(route: Route, session: &AuthSession) -> Route {
    match route.required_role() {
        Role::Admin if !session.is_admin() => {
            tracing::debug!(route = %route, role = %session.role, "redirecting to home");
            Route::home()
        }
        _ => route,
    }
}
