//! Radix-tree route table.
//!
//! One tree, built once at startup. O(path-length) lookup through
//! [`matchit`]. You register a path, a name and a view; you resolve a
//! location back to them. Nothing renders here: views are opaque values the
//! caller hands in and gets back.

use std::collections::HashMap;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::error::{Error, Result};

/// One entry of the route table.
#[derive(Debug)]
pub struct Route<V> {
    path: String,
    name: String,
    view: V,
    // `path` rewritten to matchit's `{param}` syntax.
    pattern: String,
}

impl<V> Route<V> {
    /// The pattern exactly as declared, e.g. `/books/:id`.
    pub fn path(&self) -> &str { &self.path }
    pub fn name(&self) -> &str { &self.name }
    pub fn view(&self) -> &V { &self.view }

    /// Names of the parameter segments, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.pattern.split('/').filter_map(param_name)
    }
}

/// The outcome of a successful [`Router::resolve`].
#[derive(Debug)]
pub struct RouteMatch<'r, V> {
    route: &'r Route<V>,
    params: HashMap<String, String>,
}

impl<'r, V> RouteMatch<'r, V> {
    pub fn name(&self) -> &'r str { &self.route.name }
    pub fn path(&self) -> &'r str { &self.route.path }
    pub fn view(&self) -> &'r V { &self.route.view }
    pub fn params(&self) -> &HashMap<String, String> { &self.params }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/books/:id`, `m.param("id")` on `/books/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// The application route table.
///
/// Entries keep their declaration order; [`Router::routes`] returns them as
/// declared. Each [`Router::route`] call returns `self` so declarations chain.
pub struct Router<V> {
    base: String,
    routes: Vec<Route<V>>,
    tree: MatchitRouter<usize>,
}

impl<V> Router<V> {
    pub fn new() -> Self {
        Self { base: String::new(), routes: Vec::new(), tree: MatchitRouter::new() }
    }

    /// Mount the table under a history base such as `/app/`.
    ///
    /// Locations handed to [`resolve`](Router::resolve) must start with the
    /// base; [`href`](Router::href) prepends it. `/` and `""` mean no base.
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = base.trim_end_matches('/').to_owned();
        if !self.base.is_empty() && !self.base.starts_with('/') {
            self.base.insert(0, '/');
        }
        self
    }

    /// Declare a route. Returns `self` for chaining.
    ///
    /// Parameters may be written `:id` or `{id}`:
    ///
    /// ```rust
    /// # use folio::Router;
    /// let table = Router::new()
    ///     .route("/",           "home",         "HomeView")
    ///     .route("/books/:id",  "book-details", "DetailsView");
    /// # assert_eq!(table.routes().len(), 2);
    /// ```
    ///
    /// # Panics
    ///
    /// The table is static configuration, so mistakes in it panic at startup:
    /// a pattern matchit rejects (including a duplicate or conflicting path)
    /// or a name that is already taken.
    pub fn route(mut self, path: &str, name: &str, view: V) -> Self {
        if self.routes.iter().any(|r| r.name == name) {
            panic!("duplicate route name `{name}`");
        }
        let pattern = to_matchit(path);
        self.tree
            .insert(pattern.clone(), self.routes.len())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        debug!(path, name, "route declared");
        self.routes.push(Route { path: path.to_owned(), name: name.to_owned(), view, pattern });
        self
    }

    /// The declared entries, in declaration order.
    pub fn routes(&self) -> &[Route<V>] { &self.routes }

    /// Resolve a location (path, optionally with query and fragment) to a route.
    ///
    /// The query string and fragment are ignored, as is one trailing slash
    /// after a non-root path. `//` is not the root.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch<'_, V>> {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        let path = self.strip_base(path)?;

        let matched = match self.tree.at(path) {
            Ok(m) => m,
            Err(_) if path.len() > 2 && path.ends_with('/') => {
                self.tree.at(&path[..path.len() - 1]).ok()?
            }
            Err(_) => return None,
        };

        let route = &self.routes[*matched.value];
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode(v)))
            .collect();
        Some(RouteMatch { route, params })
    }

    /// Build the path of a named route, filling its parameters from `params`.
    ///
    /// Parameter values are percent-encoded. The base is not included; see
    /// [`href`](Router::href).
    pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let route = self.routes.iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::UnknownRoute(name.to_owned()))?;

        let mut segments = Vec::new();
        for segment in route.pattern.split('/') {
            match param_name(segment) {
                None => segments.push(segment.to_owned()),
                Some(param) => {
                    let value = params.iter()
                        .find(|(k, _)| *k == param)
                        .map(|(_, v)| *v)
                        .ok_or_else(|| Error::MissingParam {
                            route: name.to_owned(),
                            param: param.to_owned(),
                        })?;
                    if segment.starts_with("{*") {
                        segments.push(value.to_owned());
                    } else {
                        segments.push(urlencoding::encode(value).into_owned());
                    }
                }
            }
        }
        Ok(segments.join("/"))
    }

    /// [`reverse`](Router::reverse) with the history base prepended.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        Ok(format!("{}{}", self.base, self.reverse(name, params)?))
    }

    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(self.base.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            // `/application` is not under `/app`.
            _ => None,
        }
    }
}

impl<V> Default for Router<V> {
    fn default() -> Self { Self::new() }
}

/// Rewrite `:name` segments to matchit's `{name}`; everything else passes through.
fn to_matchit(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => segment.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `{id}` → `id`, `{*rest}` → `rest`, anything else → `None`.
fn param_name(segment: &str) -> Option<&str> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    Some(inner.strip_prefix('*').unwrap_or(inner))
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map(|s| s.into_owned()).unwrap_or_else(|_| raw.to_owned())
}
