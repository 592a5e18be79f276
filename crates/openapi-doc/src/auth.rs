//! Authentication scheme detection and header formatting

use crate::types::*;

/// Detected authentication scheme for a document or operation
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// No authentication required
    None,
    /// Bearer token (Authorization: Bearer <token>)
    Bearer { format: Option<String> },
    /// API key in header, query, or cookie
    ApiKey {
        name: String,
        location: ApiKeyLocation,
    },
    /// Basic authentication
    Basic,
    /// OAuth2 authentication
    OAuth2 {
        authorization_url: Option<String>,
        token_url: Option<String>,
        scopes: Vec<String>,
    },
    /// Multiple auth schemes (any of)
    Multiple(Vec<AuthScheme>),
}

impl AuthScheme {
    /// Detect the authentication scheme from the components table and the
    /// effective security requirements (operation-level when declared, else
    /// document-level).
    ///
    /// With no requirements at all, the first declared scheme is used so
    /// panels can still offer a credential field for documents that omit
    /// global requirements.
    pub fn detect(components: Option<&Components>, requirements: &[SecurityRequirement]) -> Self {
        let schemes = components.map(|c| &c.security_schemes);

        if requirements.is_empty() {
            return schemes
                .and_then(|schemes| schemes.first())
                .and_then(|(_, candidate)| candidate.resolve(components))
                .map(Self::from_scheme)
                .unwrap_or(AuthScheme::None);
        }

        let mut detected: Vec<AuthScheme> = Vec::new();

        for requirement in requirements {
            for (name, scopes) in requirement {
                let Some(candidate) = schemes.and_then(|schemes| schemes.get(name)) else {
                    continue;
                };
                let Some(scheme) = candidate.resolve(components) else {
                    continue;
                };

                let mut auth = Self::from_scheme(scheme);
                if let AuthScheme::OAuth2 {
                    scopes: ref mut required,
                    ..
                } = auth
                {
                    *required = scopes.clone();
                }
                detected.push(auth);
            }
        }

        match detected.len() {
            0 => AuthScheme::None,
            1 => detected.remove(0),
            _ => AuthScheme::Multiple(detected),
        }
    }

    fn from_scheme(scheme: &SecurityScheme) -> Self {
        match scheme {
            SecurityScheme::ApiKey { name, location, .. } => AuthScheme::ApiKey {
                name: name.clone(),
                location: *location,
            },
            SecurityScheme::Http {
                scheme,
                bearer_format,
                ..
            } => match scheme.to_lowercase().as_str() {
                "bearer" => AuthScheme::Bearer {
                    format: bearer_format.clone(),
                },
                "basic" => AuthScheme::Basic,
                _ => AuthScheme::Bearer { format: None },
            },
            SecurityScheme::OAuth2 { flows, .. } => {
                // Prefer the authorization_code flow
                let (authorization_url, token_url) =
                    if let Some(flow) = &flows.authorization_code {
                        (flow.authorization_url.clone(), flow.token_url.clone())
                    } else if let Some(flow) = &flows.client_credentials {
                        (None, flow.token_url.clone())
                    } else if let Some(flow) = &flows.implicit {
                        (flow.authorization_url.clone(), None)
                    } else if let Some(flow) = &flows.password {
                        (None, flow.token_url.clone())
                    } else {
                        (None, None)
                    };

                AuthScheme::OAuth2 {
                    authorization_url,
                    token_url,
                    scopes: Vec::new(),
                }
            }
            SecurityScheme::OpenIdConnect {
                open_id_connect_url,
                ..
            } => AuthScheme::OAuth2 {
                authorization_url: Some(open_id_connect_url.clone()),
                token_url: None,
                scopes: Vec::new(),
            },
            // No interactive credential to inject
            SecurityScheme::MutualTls { .. } => AuthScheme::None,
        }
    }

    /// Header carrying the credential, when this scheme uses one
    pub fn header_name(&self) -> Option<&str> {
        match self {
            AuthScheme::Bearer { .. } | AuthScheme::Basic | AuthScheme::OAuth2 { .. } => {
                Some("Authorization")
            }
            AuthScheme::ApiKey { name, location } => {
                if *location == ApiKeyLocation::Header {
                    Some(name)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Format the header value for a credential
    pub fn format_header(&self, credential: &str) -> Option<String> {
        match self {
            AuthScheme::Bearer { .. } | AuthScheme::OAuth2 { .. } => {
                Some(format!("Bearer {}", credential))
            }
            AuthScheme::Basic => Some(format!("Basic {}", credential)),
            AuthScheme::ApiKey { location, .. } => {
                if *location == ApiKeyLocation::Header {
                    Some(credential.to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
