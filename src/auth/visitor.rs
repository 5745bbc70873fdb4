// src/auth/visitor.rs
use astra::{Request, Response};
use http::header::{HeaderValue, COOKIE, SET_COOKIE};

use crate::auth::token::{generate_token_default, is_well_formed, visitor_key};

pub const VISITOR_COOKIE: &str = "visitor";

/// Anonymous browser identity carried in the `visitor` cookie.
#[derive(Debug, Clone)]
pub struct Visitor {
    token: String,
    /// Hashed token; the only form stored in the database.
    pub key: String,
    pub is_new: bool,
}

impl Visitor {
    pub fn from_request(req: &Request) -> Self {
        match cookie_value(req, VISITOR_COOKIE).filter(|t| is_well_formed(t)) {
            Some(token) => Self::known(token),
            None => Self::fresh(),
        }
    }

    pub fn fresh() -> Self {
        let token = generate_token_default();
        Self {
            key: visitor_key(&token),
            token,
            is_new: true,
        }
    }

    fn known(token: String) -> Self {
        Self {
            key: visitor_key(&token),
            token,
            is_new: false,
        }
    }

    pub fn cookie(&self) -> String {
        format!(
            "{VISITOR_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=31536000",
            self.token
        )
    }

    /// Sets the cookie on the response the first time a visitor is seen.
    pub fn attach(&self, resp: &mut Response) {
        if !self.is_new {
            return;
        }
        match HeaderValue::from_str(&self.cookie()) {
            Ok(value) => {
                resp.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => log::error!("visitor cookie is not a valid header: {e}"),
        }
    }
}

fn cookie_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
}
