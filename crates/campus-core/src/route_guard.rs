//! Session guard decisions for route trees.
//!
//! The guard only looks at whether a session cookie is present. Token
//! validity is the API's concern; a stale cookie is caught there with a 401.

/// Query parameter carrying the originally requested path.
pub const REDIRECT_PARAM: &str = "redirect";

/// How a request path relates to the guarded route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Sign-in page or one of its siblings (sign-up, password reset)
    Signin,
    Protected,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo {
        path: String,
        /// Original path to return to after signing in
        redirect: Option<String>,
    },
}

impl Decision {
    /// Location header value for a redirect, `None` for [`Decision::Allow`].
    pub fn location(&self) -> Option<String> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo {
                path,
                redirect: None,
            } => Some(path.clone()),
            Decision::RedirectTo {
                path,
                redirect: Some(original),
            } => Some(format!(
                "{}?{}={}",
                path,
                REDIRECT_PARAM,
                urlencoding::encode(original)
            )),
        }
    }
}

/// Route rules evaluated by the session guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRules {
    pub signin_path: String,
    /// Where signed-in users land when they open an auth page
    pub home_path: String,
    /// Extra auth pages treated like the sign-in page
    pub auth_paths: Vec<String>,
    pub protected_prefixes: Vec<String>,
}

impl Default for GuardRules {
    fn default() -> Self {
        Self {
            signin_path: "/admin/signin".to_string(),
            home_path: "/admin/dashboard".to_string(),
            auth_paths: vec![
                "/admin/signup".to_string(),
                "/admin/forgot-password".to_string(),
                "/admin/reset-password".to_string(),
            ],
            protected_prefixes: vec!["/admin".to_string()],
        }
    }
}

/// True when `path` equals `prefix` or continues it with a new segment.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl GuardRules {
    /// Auth paths are checked before protected prefixes, so `/admin/signin`
    /// is a sign-in page even though it sits under `/admin`.
    pub fn classify(&self, path: &str) -> PathKind {
        let is_auth = std::iter::once(&self.signin_path)
            .chain(self.auth_paths.iter())
            .any(|auth| matches_prefix(path, auth));
        if is_auth {
            return PathKind::Signin;
        }

        if self
            .protected_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
        {
            return PathKind::Protected;
        }

        PathKind::Other
    }

    pub fn evaluate(&self, path: &str, has_token: bool) -> Decision {
        match (has_token, self.classify(path)) {
            (false, PathKind::Protected) => Decision::RedirectTo {
                path: self.signin_path.clone(),
                redirect: Some(path.to_string()),
            },
            (true, PathKind::Signin) => Decision::RedirectTo {
                path: self.home_path.clone(),
                redirect: None,
            },
            _ => Decision::Allow,
        }
    }
}
