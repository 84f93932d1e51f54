use tracing::{debug, error, info};

use crate::error::HandlerError;
use crate::request::{Method, Request};
use crate::response::{Response, Status};
use crate::router::Route;
use crate::store::FileStore;

impl Route {
    pub async fn handle(self, req: &Request, store: &FileStore) -> Result<Response, HandlerError> {
        match self {
            Self::Files => files(req, store).await,
            Self::Echo => echo(req),
            Self::UserAgent => user_agent(req),
            Self::Root => Ok(root()),
        }
    }
}

/// Second segment of the target, e.g. `abc` for `/echo/abc/def`.
fn path_segment(req: &Request) -> Result<&str, HandlerError> {
    req.target()
        .strip_prefix('/')
        .and_then(|path| path.split('/').nth(1))
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| HandlerError::MalformedTarget(req.target().to_owned()))
}

fn echo(req: &Request) -> Result<Response, HandlerError> {
    let to_echo = path_segment(req)?;
    Ok(Response::builder().as_text().with_body(to_echo))
}

fn user_agent(req: &Request) -> Result<Response, HandlerError> {
    let agent = req
        .header("user-agent")
        .ok_or(HandlerError::MissingHeader("User-Agent"))?;
    Ok(Response::builder().as_text().with_body(agent))
}

fn root() -> Response {
    Response::builder().with_body(Vec::new())
}

#[tracing::instrument(skip(req, store), fields(method = req.method_str()))]
async fn files(req: &Request, store: &FileStore) -> Result<Response, HandlerError> {
    let name = path_segment(req)?;
    match req.method() {
        Method::Get => match store.read(name).await {
            Ok(Some(data)) => {
                debug!(len = data.len(), "read file.");
                Ok(Response::builder().as_octet_stream().with_body(data))
            }
            Ok(None) => {
                debug!("file not found.");
                Ok(Response::not_found())
            }
            Err(e) => {
                error!(error = %e, "error reading file.");
                Err(e.into())
            }
        },
        Method::Post => {
            store.write(name, req.body()).await?;
            info!(len = req.body().len(), "wrote file.");
            Ok(Response::builder()
                .with_status(Status::Created)
                .with_body(Vec::new()))
        }
        _ => Err(HandlerError::UnsupportedMethod(req.method_str().to_owned())),
    }
}
