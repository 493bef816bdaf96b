//! External API integrations

pub mod geocoding;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use weather::WeatherClient;

/// Serve `router` on an ephemeral local port and return its base URL
#[cfg(test)]
pub(crate) async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
