use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::Value;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use graphql_directive::{
    BoxFuture, FxHashMap, GraphQLServer, Model, RegisterClass, ResolverClass, ResolverContext,
    ResolverError, ResolverResult, Settings,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[derive(Default, RegisterClass)]
#[class(name = "App.GraphQL.Queries.UserQuery")]
struct UserQuery;

impl UserQuery {
    fn user(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("User {}", id),
            "email": format!("user{}@example.com", id),
        })
    }
}

impl ResolverClass for UserQuery {
    fn methods() -> &'static [&'static str] {
        &["resolve", "find"]
    }

    fn call<'a>(
        &'a self,
        method: &'a str,
        ctx: &'a ResolverContext,
        args: FxHashMap<String, Value>,
    ) -> BoxFuture<'a, ResolverResult<Value>> {
        Box::pin(async move {
            tracing::debug!(method, model = ?ctx.model_class(), "UserQuery called");

            let value = match method {
                "find" => {
                    let id = match args.get("id") {
                        Some(Value::String(id)) => id.clone(),
                        _ => return Err(ResolverError::Argument("id is required".to_string())),
                    };
                    Self::user(&id)
                }
                _ => serde_json::Value::Array(
                    (1..=5).map(|i| Self::user(&i.to_string())).collect(),
                ),
            };

            Ok(Value::from_json(value)?)
        })
    }
}

#[derive(Default, RegisterClass)]
#[class(name = "App.GraphQL.Queries.PostQuery")]
struct PostQuery;

impl ResolverClass for PostQuery {
    fn methods() -> &'static [&'static str] {
        &["resolve", "byAuthor"]
    }

    fn call<'a>(
        &'a self,
        _method: &'a str,
        ctx: &'a ResolverContext,
        _args: FxHashMap<String, Value>,
    ) -> BoxFuture<'a, ResolverResult<Value>> {
        Box::pin(async move {
            let author_id = match ctx.parent_value() {
                Some(Value::Object(user)) => match user.get("id") {
                    Some(Value::String(id)) => id.clone(),
                    _ => "0".to_string(),
                },
                _ => "0".to_string(),
            };

            let posts: Vec<serde_json::Value> = (1..=3)
                .map(|i| {
                    serde_json::json!({
                        "id": format!("{}-post-{}", author_id, i),
                        "title": format!("Post {} by User {}", i, author_id),
                        "content": "Lorem ipsum dolor sit amet...",
                    })
                })
                .collect();

            Ok(Value::from_json(serde_json::Value::Array(posts))?)
        })
    }
}

#[allow(dead_code)]
#[derive(Model)]
#[model(name = "App.Models.User")]
struct User;

#[allow(dead_code)]
#[derive(Model)]
#[model(name = "App.Models.Post")]
struct Post;

const SCHEMA: &str = r#"
    type Query {
        user(id: ID!): User
            @field(resolver: "UserQuery@find")
            @namespace(field: "App.GraphQL.Queries")
            @find
        users: [User!]!
            @field(resolver: "UserQuery")
            @namespace(field: "App.GraphQL.Queries")
            @all
    }

    type User @model(model: "User") {
        id: ID!
        name: String!
        email: String!
        posts: [Post!]!
            @field(class: "App.GraphQL.Queries.PostQuery", method: "byAuthor")
            @hasMany
    }

    type Post {
        id: ID!
        title: String!
        content: String!
    }
"#;

const SETTINGS: &str = r#"{ "namespaces": { "models": "App.Models" } }"#;

async fn graphql_handler(
    State(server): State<Arc<GraphQLServer>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    server.schema().execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_json(SETTINGS).expect("Invalid settings");

    let server = GraphQLServer::builder()
        .with_inventory()
        .settings(settings)
        .sdl(SCHEMA)
        .build()
        .expect("Failed to build GraphQL server");

    for (type_name, field) in server.bindings().bound_fields() {
        tracing::info!(
            field = %format!("{}.{}", type_name, field.name),
            resolver = ?field.resolver_binding().map(ToString::to_string),
            model = ?field.model_class,
            "bound field"
        );
    }

    let server = Arc::new(server);

    let app = Router::new()
        .route("/", get(graphiql))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(CorsLayer::permissive())
        .with_state(server);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    tracing::info!("GraphQL server running at http://localhost:8080");
    tracing::info!("GraphiQL playground at http://localhost:8080/graphql");

    axum::serve(listener, app).await.unwrap();
}
