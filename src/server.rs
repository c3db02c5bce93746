use crate::{Error, Logger};
use hyper::{
    body::HttpBody,
    header::{HeaderValue, CONTENT_TYPE},
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::Regex;
use serde_json::json;
use std::{borrow::Cow, collections::HashMap, convert::Infallible, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

pub type Parameters = HashMap<String, String>;

/// URI pattern with `{name}` placeholders, each matching one path segment.
pub struct DynamicUri {
    regex: Regex,
    parameters: HashMap<String, usize>,
}

impl DynamicUri {
    pub fn new(uri: &str) -> Self {
        let placeholder = Regex::new(r"\{([^\{]*)\}").expect("placeholder pattern");
        let mut offset = 0;
        let mut index = 1;
        let mut chunks = Vec::new();
        let mut parameters = HashMap::new();
        for occurence in placeholder.find_iter(uri) {
            let range = occurence.range();
            let name = &uri[range.start + 1..range.end - 1];
            assert!(parameters.get(name).is_none(), "duplicate parameter {} in {}", name, uri);
            parameters.insert(name.to_string(), index);
            chunks.push(Cow::Owned(regex::escape(&uri[offset..range.start])));
            chunks.push(Cow::from("([^/]*)"));
            offset = range.end;
            index += 1;
        }
        chunks.push(Cow::Owned(regex::escape(&uri[offset..])));
        let regex = Regex::new(&format!("^{}$", chunks.join(""))).expect("escaped route pattern");
        Self { regex, parameters }
    }

    pub fn check(&self, uri: &str) -> Option<Parameters> {
        let captures = self.regex.captures(uri)?;
        Some(
            self.parameters
                .iter()
                .map(|(name, &index)| (name.clone(), captures[index].to_string()))
                .collect(),
        )
    }
}

fn parse_query(query: &str, parameters: &mut Parameters) {
    for part in query.split('&') {
        let parts: Vec<&str> = part.split('=').collect();
        if parts.len() == 2 {
            parameters.insert(parts[0].to_string(), parts[1].to_string());
        }
    }
}

pub fn respond(status: StatusCode, value: serde_json::Value) -> Response<Body> {
    let mut response = Response::new(Body::from(value.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

pub fn respond_ok(value: serde_json::Value) -> Response<Body> {
    respond(StatusCode::OK, value)
}

pub fn respond_error(error: Error) -> Response<Body> {
    respond(StatusCode::BAD_REQUEST, json!({ "message": error.message() }))
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(Request<Body>, Parameters, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;
type BoxedDefaultHandler<S> = Box<dyn Fn(Request<Body>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    dynamic_uri: DynamicUri,
    handler: BoxedHandler<S>,
}

impl<S> Route<S> {
    fn new(method: Method, uri: &str, handler: BoxedHandler<S>) -> Self {
        Self {
            method,
            dynamic_uri: DynamicUri::new(uri),
            handler,
        }
    }

    fn check(&self, request: &Request<Body>) -> Option<Parameters> {
        if request.method() == self.method {
            self.dynamic_uri.check(request.uri().path())
        } else {
            None
        }
    }
}

pub struct Router<S> {
    default: Option<BoxedDefaultHandler<S>>,
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
}

impl<S> Router<S> {
    pub fn new(state: Arc<S>) -> Self {
        Self {
            default: None,
            routes: Vec::new(),
            state,
            logger: Logger::new("server"),
        }
    }

    fn add<H, F>(&mut self, method: Method, uri: &str, handler: H)
    where
        H: 'static + Fn(Request<Body>, Parameters, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route::new(
            method,
            uri,
            Box::new(move |request, parameters, body, state| Box::pin(handler(request, parameters, body, state))),
        ));
    }

    pub fn default<H, F>(&mut self, handler: H)
    where
        H: 'static + Fn(Request<Body>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.default = Some(Box::new(move |request, body, state| Box::pin(handler(request, body, state))));
    }

    pub async fn route(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        self.logger.log(format!("{} {}", request.method(), request.uri()));
        for route in &self.routes {
            if let Some(mut parameters) = route.check(&request) {
                if let Some(query) = request.uri().query() {
                    parse_query(query, &mut parameters);
                }
                return (route.handler)(request, parameters, body, self.state.clone()).await;
            }
        }
        match &self.default {
            Some(default) => default(request, body, self.state.clone()).await,
            None => respond(StatusCode::NOT_FOUND, json!({ "message": "Not found" })),
        }
    }
}

pub struct Server<S> {
    router: Router<S>,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>) -> Self {
        Self {
            router: Router::new(state),
        }
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H)
    where
        H: 'static + Fn(Request<Body>, Parameters, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::GET, uri, handler);
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H)
    where
        H: 'static + Fn(Request<Body>, Parameters, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::POST, uri, handler);
    }

    pub fn default<H, F>(&mut self, handler: H)
    where
        H: 'static + Fn(Request<Body>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.default(handler);
    }

    #[cfg(test)]
    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        handle(&self.router, request).await
    }

    pub async fn run(self, address: SocketAddr) -> Result<(), Error> {
        let router = Arc::new(self.router);
        let make_service = make_service_fn(|_| {
            let router = router.clone();
            async {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let router = router.clone();
                    async move { Ok::<_, Infallible>(handle(&router, request).await) }
                }))
            }
        });
        let server = hyper::Server::try_bind(&address)?;
        router.logger.log(format!("listening on {}", address));
        server.serve(make_service).await?;
        Ok(())
    }
}

async fn handle<S>(router: &Router<S>, mut request: Request<Body>) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = request.body_mut().data().await {
        match chunk {
            Ok(chunk) => body.extend_from_slice(&chunk),
            Err(error) => return respond_error(Error::new(format!("Cannot read body: {}", error))),
        }
    }
    router.route(request, body).await
}
