use crate::{
    json,
    server::{respond, respond_error, respond_ok, Parameters},
    Arc, Error, Panel, Server, State, StatusCode, Unit,
};

macro_rules! unwrap {
    ( $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => return respond_error(error),
        }
    }};
}

fn parse_unit_from_parameters(parameters: &Parameters) -> Result<Unit, Error> {
    parameters
        .get("unit")
        .ok_or_else(|| Error::new("Missing unit parameter"))?
        .parse()
}

fn format_panel(panel: &Panel) -> serde_json::Value {
    json!(panel)
}

pub fn create_server(state: Arc<State>) -> Server<State> {
    let mut server = Server::new(state);

    server.get("/stopwatch", |_request, _parameters, _body, state| async move {
        respond_ok(format_panel(&state.panel().await))
    });

    server.get("/stopwatch/units/{unit}", |_request, parameters, _body, state| async move {
        let unit = unwrap!(parse_unit_from_parameters(&parameters));
        let panel = state.panel().await;
        respond_ok(json!({ "unit": unit.name(), "value": panel.slot(unit) }))
    });

    server.post("/stopwatch/toggle", |_request, _parameters, _body, state| async move {
        respond_ok(format_panel(&state.toggle().await))
    });

    server.post("/stopwatch/start", |_request, _parameters, _body, state| async move {
        respond_ok(format_panel(&state.start().await))
    });

    server.post("/stopwatch/stop", |_request, _parameters, _body, state| async move {
        respond_ok(format_panel(&state.stop().await))
    });

    server.post("/stopwatch/reset", |_request, _parameters, _body, state| async move {
        respond_ok(format_panel(&state.reset().await))
    });

    server.default(|_request, _body, _state| async move { respond(StatusCode::NOT_FOUND, json!({ "message": "Not found" })) });

    server
}

#[cfg(test)]
mod tests {
    use super::create_server;
    use crate::{Arc, State, StatusCode};
    use hyper::{body::to_bytes, Body, Method, Request, Response};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::time::advance;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    async fn body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_and_reset() {
        let state = Arc::new(State::new());
        let server = create_server(state.clone());

        let response = server.handle(request(Method::GET, "/stopwatch")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        let panel = body(response).await;
        assert_eq!(panel["button"], json!("Start"));
        assert_eq!(panel["slots"].as_array().map(Vec::len), Some(11));

        let panel = body(server.handle(request(Method::POST, "/stopwatch/toggle")).await).await;
        assert_eq!(panel["button"], json!("Stop"));
        assert_eq!(panel["running"], json!(true));

        advance(Duration::from_millis(1500)).await;
        state.tick().await;
        let slot = body(server.handle(request(Method::GET, "/stopwatch/units/second")).await).await;
        assert_eq!(slot, json!({"unit": "second", "value": "01"}));
        let slot = body(server.handle(request(Method::GET, "/stopwatch/units/millisecond")).await).await;
        assert_eq!(slot, json!({"unit": "millisecond", "value": "500"}));

        let panel = body(server.handle(request(Method::POST, "/stopwatch/toggle")).await).await;
        assert_eq!(panel["button"], json!("Start"));
        assert_eq!(panel["elapsed"], json!(1500.0));

        let panel = body(server.handle(request(Method::POST, "/stopwatch/reset")).await).await;
        assert_eq!(panel["elapsed"], json!(0.0));
        assert_eq!(panel["running"], json!(false));
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop() {
        let server = create_server(Arc::new(State::new()));
        let panel = body(server.handle(request(Method::POST, "/stopwatch/start")).await).await;
        assert_eq!(panel["running"], json!(true));
        let panel = body(server.handle(request(Method::POST, "/stopwatch/start")).await).await;
        assert_eq!(panel["running"], json!(true));
        advance(Duration::from_millis(250)).await;
        let panel = body(server.handle(request(Method::POST, "/stopwatch/stop")).await).await;
        assert_eq!(panel["running"], json!(false));
        assert_eq!(panel["elapsed"], json!(250.0));
    }

    #[tokio::test]
    async fn unknown_unit() {
        let server = create_server(Arc::new(State::new()));
        let response = server.handle(request(Method::GET, "/stopwatch/units/fortnight")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(response).await, json!({"message": r#"Unknown unit "fortnight""#}));
    }

    #[tokio::test]
    async fn not_found() {
        let server = create_server(Arc::new(State::new()));
        let response = server.handle(request(Method::GET, "/stopwatch/toggle")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await, json!({"message": "Not found"}));
    }
}
