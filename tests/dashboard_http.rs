//! Drives the dashboard against the real `/foods` router over HTTP.

use std::sync::Mutex;

use gofood::server::{router, FoodStore};
use gofood::{
    Alerts, ApiError, ConfirmOutcome, Confirmation, Dashboard, DashboardError, DeleteOutcome,
    FoodPlate, FoodPlateInput, FoodsApi, HttpFoodsApi, LoadState, Notice, NoticeLevel,
};

struct ScriptedAlerts {
    answer: ConfirmOutcome,
    notices: Mutex<Vec<Notice>>,
}

impl ScriptedAlerts {
    fn answering(answer: ConfirmOutcome) -> Self {
        Self {
            answer,
            notices: Mutex::new(Vec::new()),
        }
    }

    fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl Alerts for ScriptedAlerts {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    async fn confirm_destructive(&self, _confirmation: &Confirmation) -> ConfirmOutcome {
        self.answer
    }
}

fn burger() -> FoodPlate {
    FoodPlate {
        id: 1,
        name: "X-Burger".to_string(),
        image: "https://example.com/burger.png".to_string(),
        price: "10.00".to_string(),
        description: "Bun, patty and cheese".to_string(),
        available: true,
    }
}

/// Starts the router on an ephemeral port and returns its base URL.
async fn spawn_server(foods: Vec<FoodPlate>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(FoodStore::in_memory(foods));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_mount_loads_initial_collection() {
    let url = spawn_server(vec![burger()]).await;
    let mut dashboard = Dashboard::new(
        HttpFoodsApi::new(url),
        ScriptedAlerts::answering(ConfirmOutcome::Confirmed),
    );

    dashboard.mount().await.unwrap();

    assert_eq!(dashboard.load_state(), &LoadState::Ready);
    assert_eq!(dashboard.foods(), &[burger()]);
}

#[tokio::test]
async fn test_full_menu_lifecycle() {
    let url = spawn_server(vec![burger()]).await;
    let mut dashboard = Dashboard::new(
        HttpFoodsApi::new(url.clone()),
        ScriptedAlerts::answering(ConfirmOutcome::Confirmed),
    );
    dashboard.mount().await.unwrap();

    let pizza = dashboard
        .request_add(
            FoodPlateInput::new("Pizza", "20.00")
                .with_image("https://example.com/pizza.png")
                .with_description("Mozzarella and basil"),
        )
        .await
        .unwrap();
    assert_eq!(pizza.id, 2);
    assert!(pizza.available);
    assert_eq!(dashboard.foods().len(), 2);

    dashboard.select_for_edit(pizza.clone());
    let edited = dashboard
        .request_update(pizza.to_input().with_description("Now with olives"))
        .await
        .unwrap();
    assert_eq!(edited.id, 2);
    assert_eq!(dashboard.find(2).unwrap().description, "Now with olives");

    let toggled = dashboard.toggle_available(2).await.unwrap();
    assert!(!toggled.available);

    let outcome = dashboard.request_delete(1).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(dashboard.foods().len(), 1);

    // The server agrees with the local mirror.
    let remote = HttpFoodsApi::new(url).list_all().await.unwrap();
    assert_eq!(remote, dashboard.foods());

    assert_eq!(
        dashboard.alerts().titles(),
        vec![
            "Plate Pizza added successfully!".to_string(),
            "Plate Pizza updated successfully!".to_string(),
            "Plate deleted!".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_declined_delete_issues_no_request() {
    let url = spawn_server(vec![burger()]).await;
    let mut dashboard = Dashboard::new(
        HttpFoodsApi::new(url.clone()),
        ScriptedAlerts::answering(ConfirmOutcome::Cancelled),
    );
    dashboard.mount().await.unwrap();

    let outcome = dashboard.request_delete(1).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Kept);
    assert_eq!(dashboard.foods(), &[burger()]);
    assert_eq!(dashboard.alerts().titles(), vec!["Not deleted".to_string()]);

    let remote = HttpFoodsApi::new(url).list_all().await.unwrap();
    assert_eq!(remote, vec![burger()]);
}

#[tokio::test]
async fn test_blank_name_is_a_validation_error() {
    let url = spawn_server(Vec::new()).await;
    let mut dashboard = Dashboard::new(
        HttpFoodsApi::new(url),
        ScriptedAlerts::answering(ConfirmOutcome::Confirmed),
    );
    dashboard.mount().await.unwrap();

    let err = dashboard
        .request_add(FoodPlateInput::new("   ", "5.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, DashboardError::Api(ApiError::Validation(_))));
    assert!(dashboard.foods().is_empty());

    let notices = dashboard.alerts().notices.lock().unwrap().clone();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].title.starts_with("Error! Validation failed"));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let url = spawn_server(vec![burger()]).await;
    let api = HttpFoodsApi::new(url);

    let err = api.update(99, burger()).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = api.remove(99).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_put_never_changes_the_stored_id() {
    let url = spawn_server(vec![burger()]).await;
    let api = HttpFoodsApi::new(url);

    let mut renamed = burger();
    renamed.id = 42;
    renamed.name = "X-Bacon".to_string();

    let updated = api.update(1, renamed).await.unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "X-Bacon");
}

#[tokio::test]
async fn test_unreachable_server_fails_mount() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut dashboard = Dashboard::new(
        HttpFoodsApi::new(format!("http://{}", addr)),
        ScriptedAlerts::answering(ConfirmOutcome::Confirmed),
    );

    let err = dashboard.mount().await.unwrap_err();
    assert!(matches!(err, DashboardError::Api(ApiError::Network(_))));
    assert!(matches!(dashboard.load_state(), LoadState::Failed(_)));
}
