//! compgraph web server
//!
//! Axum-based REST API over the graph CRUD service.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use compgraph_graph::GraphStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `/nodes` itself is registered on the outer router
    let node_routes = Router::new()
        .route("/batch", get(routes::nodes::get_nodes_batch))
        .route("/aggregates", get(routes::nodes::get_node_aggregates))
        .route("/{name}", get(routes::nodes::get_node))
        .route("/create-node", post(routes::nodes::create_node))
        .route("/create-node-with-properties", post(routes::nodes::create_node_with_properties))
        .route("/add_properties", patch(routes::nodes::add_properties))
        .route("/add_properties_multiple", patch(routes::nodes::add_properties_multiple))
        .route("/update_properties", patch(routes::nodes::update_properties))
        .route("/update_properties_multiple", patch(routes::nodes::update_properties_multiple))
        .route("/remove_properties", patch(routes::nodes::remove_properties))
        .route("/remove_properties_multiple", patch(routes::nodes::remove_properties_multiple))
        .route("/delete_node", delete(routes::nodes::delete_node))
        .route("/delete_nodes", delete(routes::nodes::delete_nodes));

    let relationship_routes = Router::new()
        .route("/properties", get(routes::relationships::get_relationship_properties))
        .route("/create-relationship", post(routes::relationships::create_relationship))
        .route(
            "/add_properties_to_relationship",
            patch(routes::relationships::add_properties_to_relationship),
        )
        .route(
            "/add_properties_to_multiple_relationships",
            patch(routes::relationships::add_properties_to_multiple_relationships),
        )
        .route(
            "/update_properties_in_relationship",
            patch(routes::relationships::update_properties_in_relationship),
        )
        .route(
            "/update_properties_in_multiple_relationships",
            patch(routes::relationships::update_properties_in_multiple_relationships),
        )
        .route("/delete_relationship", delete(routes::relationships::delete_relationship))
        .route("/delete_relationships", delete(routes::relationships::delete_relationships))
        .route(
            "/remove_properties_from_relationship",
            delete(routes::relationships::remove_properties_from_relationship),
        )
        .route(
            "/remove_properties_from_multiple_relationships",
            delete(routes::relationships::remove_properties_from_multiple_relationships),
        );

    Router::new()
        .route("/", get(routes::index))
        .route("/nodes", get(routes::nodes::list_nodes))
        .nest("/nodes", node_routes)
        .nest("/relationships", relationship_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the listener fails.
pub async fn run_server(store: Arc<dyn GraphStore>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("API listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
