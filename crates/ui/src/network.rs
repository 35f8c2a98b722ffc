use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, Response};

use activity_board_protocol::{parse_activities, routes, ActivityMap, Reply};

use crate::error::BoardError;

/// The three calls the board makes against the activities API
#[async_trait(?Send)]
pub trait ActivityApi {
    async fn fetch_activities(&self) -> Result<ActivityMap, BoardError>;

    /// Returns the server's confirmation message
    async fn sign_up(&self, activity: &str, email: &str) -> Result<String, BoardError>;

    /// Returns the server's confirmation message
    async fn remove_participant(&self, activity: &str, email: &str) -> Result<String, BoardError>;
}

/// `ActivityApi` over the browser Fetch API
pub struct FetchApi {
    base: String,
}

impl FetchApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Issue a request and read the whole body as text
    async fn send(&self, method: &str, path: &str) -> Result<(u16, String), BoardError> {
        let win = window().ok_or_else(|| BoardError::Transport("no window".into()))?;

        let opts = RequestInit::new();
        opts.set_method(method);
        let req = Request::new_with_str_and_init(&routes::join(&self.base, path), &opts)?;

        let resp_val = JsFuture::from(win.fetch_with_request(&req)).await?;
        let resp: Response = resp_val.dyn_into()?;
        let body = JsFuture::from(resp.text()?).await?;

        Ok((resp.status(), body.as_string().unwrap_or_default()))
    }
}

#[async_trait(?Send)]
impl ActivityApi for FetchApi {
    async fn fetch_activities(&self) -> Result<ActivityMap, BoardError> {
        let (status, body) = self.send("GET", routes::ACTIVITIES).await?;
        read_activities(status, &body)
    }

    async fn sign_up(&self, activity: &str, email: &str) -> Result<String, BoardError> {
        let (status, body) = self.send("POST", &routes::signup(activity, email)).await?;
        read_reply(status, &body)
    }

    async fn remove_participant(&self, activity: &str, email: &str) -> Result<String, BoardError> {
        let (status, body) = self.send("DELETE", &routes::participant(activity, email)).await?;
        read_reply(status, &body)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret a `GET /activities` answer
pub fn read_activities(status: u16, body: &str) -> Result<ActivityMap, BoardError> {
    if !is_success(status) {
        let detail = Reply::parse(body).ok().and_then(|r| r.detail);
        return Err(BoardError::Rejected { status, detail });
    }
    Ok(parse_activities(body)?)
}

/// Interpret a mutation answer. The body must be JSON whatever the status.
pub fn read_reply(status: u16, body: &str) -> Result<String, BoardError> {
    let reply = Reply::parse(body)?;
    if is_success(status) {
        Ok(reply.message.unwrap_or_default())
    } else {
        Err(BoardError::Rejected { status, detail: reply.detail })
    }
}
