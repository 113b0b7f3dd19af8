use chrono::NaiveDate;
use staffboard::app::{App, Connector, View};
use staffboard::config::{ConfigStore, Credentials, DuplicateCheck};
use staffboard::constants::MAX_IMAGE_BYTES;
use staffboard::core::{NotificationKind, Task, TaskFilter, TaskId};
use staffboard::remote::{MemoryBackend, TaskClient};
use staffboard::view::render_html;
use staffboard::Error;
use std::fs;
use tempfile::TempDir;

fn memory_connector(backend: &MemoryBackend) -> Connector {
    let backend = backend.clone();
    Box::new(move |_: &Credentials, policy: DuplicateCheck| {
        Ok(TaskClient::with_backend(backend.clone(), policy))
    })
}

fn task(id: i64, staff: &str, date: &str) -> Task {
    Task {
        id: TaskId::Number(id),
        staff_name: staff.to_string(),
        team_name: "Housekeeping".to_string(),
        task_description: format!("Rooms for {}", staff),
        assigned_date: date.parse().unwrap(),
        day_number: id,
        image_base64: None,
        video_link: None,
    }
}

fn configured_app(dir: &TempDir, backend: &MemoryBackend) -> App {
    let store = ConfigStore::new(dir.path().join("config.toml"));
    store.set("https://project.example.co", "anon").unwrap();
    App::with_connector(store, memory_connector(backend)).unwrap()
}

fn fill_form(app: &mut App, staff: &str, date: &str) {
    let form = app.submission_mut().form_mut();
    form.staff_name = staff.to_string();
    form.team_name = "Front Desk".to_string();
    form.task_description = "Check-in shift".to_string();
    form.assigned_date = date.to_string();
}

fn last_message(app: &mut App) -> (NotificationKind, String) {
    let n = app.notifications().last().expect("a notification");
    (n.kind, n.message.clone())
}

#[tokio::test]
async fn unconfigured_session_blocks_backend_work() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::new();
    let store = ConfigStore::new(dir.path().join("config.toml"));
    let mut app = App::with_connector(store, memory_connector(&backend)).unwrap();

    assert!(!app.is_configured());
    assert!(matches!(app.load_tasks().await, Err(Error::ConfigMissing)));

    fill_form(&mut app, "Alice", "2024-01-02");
    assert!(matches!(app.submit_task(|_| {}).await, Err(Error::ConfigMissing)));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn saving_config_connects_and_loads() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::with_tasks(vec![task(1, "Alice", "2024-01-01")]);
    let store = ConfigStore::new(dir.path().join("config.toml"));
    let mut app = App::with_connector(store, memory_connector(&backend)).unwrap();

    assert!(app.save_config("", "key").await.is_err());
    assert_eq!(
        last_message(&mut app),
        (
            NotificationKind::Error,
            "Please enter both URL and API key".to_string()
        )
    );
    assert!(!app.is_configured());

    app.save_config("https://project.example.co", "anon")
        .await
        .unwrap();
    assert!(app.is_configured());
    assert_eq!(app.list().tasks().len(), 1);
    assert_eq!(
        last_message(&mut app),
        (
            NotificationKind::Success,
            "Configuration saved successfully!".to_string()
        )
    );
}

#[tokio::test]
async fn saved_config_stands_even_when_first_load_fails() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::new();
    backend.fail_list_with("Invalid API key");
    let store = ConfigStore::new(dir.path().join("config.toml"));
    let mut app = App::with_connector(store, memory_connector(&backend)).unwrap();

    app.save_config("https://project.example.co", "bad")
        .await
        .unwrap();
    assert!(app.is_configured());
    assert!(app.list().tasks().is_empty());
    assert_eq!(
        last_message(&mut app),
        (
            NotificationKind::Error,
            "Error loading tasks: Invalid API key".to_string()
        )
    );

    let stored = ConfigStore::new(dir.path().join("config.toml"))
        .get()
        .unwrap()
        .unwrap();
    assert_eq!(stored.key, "bad");
}

#[tokio::test]
async fn blank_reconfigure_is_rejected_while_old_client_stays() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::new();
    let mut app = configured_app(&dir, &backend);
    assert!(app.is_configured());

    let result = app.save_config("https://other.example.co", "  ").await;
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(app.is_configured());
    assert_eq!(
        last_message(&mut app),
        (
            NotificationKind::Error,
            "Please enter both URL and API key".to_string()
        )
    );
    let stored = ConfigStore::new(dir.path().join("config.toml"))
        .get()
        .unwrap()
        .unwrap();
    assert_eq!(stored.url, "https://project.example.co");
}

#[tokio::test]
async fn huge_day_number_is_rejected_without_insert() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::new();
    let mut app = configured_app(&dir, &backend);

    fill_form(&mut app, "Alice", "2024-01-02");
    app.submission_mut().form_mut().day_number = i64::MAX.to_string();
    let err = app.submit_task(|_| {}).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(backend.tasks().is_empty());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn list_renders_newest_first_as_served_by_backend() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::with_tasks(vec![
        task(2, "B", "2024-01-01"),
        task(1, "A", "2024-01-02"),
    ]);
    let mut app = configured_app(&dir, &backend);
    app.load_tasks().await.unwrap();

    let view = app.list_view();
    assert_eq!(view.rows[0].staff_name, "A");
    assert_eq!(view.rows[0].assigned_date, "Jan 2, 2024");
    assert_eq!(view.rows[1].staff_name, "B");
}

#[tokio::test]
async fn duplicate_submission_is_rejected_without_insert() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::new();
    let mut app = configured_app(&dir, &backend);

    fill_form(&mut app, "Alice", "2024-01-02");
    let receipt = app.submit_task(|_| {}).await.unwrap();
    assert_eq!(receipt.next_day_number, 2);
    assert_eq!(app.list().tasks().len(), 1);
    assert_eq!(app.submission().form().day_number, "2");

    fill_form(&mut app, "Alice", "2024-01-02");
    let err = app.submit_task(|_| {}).await.unwrap_err();
    assert!(matches!(err, Error::Duplicate { .. }));
    let (kind, message) = last_message(&mut app);
    assert_eq!(kind, NotificationKind::Error);
    assert!(message.contains("Alice") && message.contains("Jan 2, 2024"));
    assert_eq!(backend.tasks().len(), 1);
    assert_eq!(app.submission().form().staff_name, "Alice");
}

#[tokio::test]
async fn failed_duplicate_lookup_lets_submission_through_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::with_tasks(vec![task(1, "Alice", "2024-01-02")]);
    backend.fail_lookup_with("timeout");
    let mut app = configured_app(&dir, &backend);

    fill_form(&mut app, "Alice", "2024-01-02");
    app.submit_task(|_| {}).await.unwrap();
    assert_eq!(backend.tasks().len(), 2);
}

#[tokio::test]
async fn fail_closed_policy_blocks_on_lookup_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "supabase_url = \"https://project.example.co\"\nsupabase_key = \"anon\"\n\n[workflow]\nduplicate_check = \"fail_closed\"\n",
    )
    .unwrap();
    let backend = MemoryBackend::new();
    backend.fail_lookup_with("timeout");
    let mut app = App::with_connector(ConfigStore::new(&path), memory_connector(&backend)).unwrap();

    fill_form(&mut app, "Alice", "2024-01-02");
    assert!(app.submit_task(|_| {}).await.is_err());
    assert_eq!(
        last_message(&mut app),
        (NotificationKind::Error, "Error adding task: timeout".to_string())
    );
    assert!(backend.tasks().is_empty());
}

#[tokio::test]
async fn filter_change_resets_to_first_page() {
    let dir = tempfile::tempdir().unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    let tasks = (0..25)
        .map(|i| {
            let date = start - chrono::Duration::days(i);
            task(i, if i % 3 == 0 { "Carla" } else { "Bob" }, &date.to_string())
        })
        .collect();
    let backend = MemoryBackend::with_tasks(tasks);
    let mut app = configured_app(&dir, &backend);
    app.load_tasks().await.unwrap();

    app.change_page(1);
    app.change_page(1);
    assert_eq!(app.list().current_page(), 3);
    let summary = app.list_view().pagination.unwrap();
    assert_eq!(summary.showing, "Showing 21 to 25 of 25 tasks");

    app.apply_filter(TaskFilter::from_inputs(Some("carla"), None, None, None));
    assert_eq!(app.list().current_page(), 1);
    assert_eq!(app.list_view().rows.len(), 9);
    assert!(app.list_view().pagination.is_none());
}

#[tokio::test]
async fn load_failure_empties_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::with_tasks(vec![task(1, "Alice", "2024-01-02")]);
    let mut app = configured_app(&dir, &backend);
    app.load_tasks().await.unwrap();

    backend.fail_list_with("JWT expired");
    assert!(app.switch_view(View::List).await.is_err());
    assert!(app.list().tasks().is_empty());
    assert!(app.list_view().is_empty());
    assert_eq!(
        last_message(&mut app),
        (
            NotificationKind::Error,
            "Error loading tasks: JWT expired".to_string()
        )
    );
}

#[tokio::test]
async fn oversized_image_is_rejected_at_selection() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MemoryBackend::new();
    let mut app = configured_app(&dir, &backend);

    let big = dir.path().join("huge.png");
    fs::File::create(&big)
        .unwrap()
        .set_len(MAX_IMAGE_BYTES + 1)
        .unwrap();

    assert!(matches!(
        app.attach_image(&big),
        Err(Error::ImageTooLarge { .. })
    ));
    assert!(app.submission().form().image().is_none());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn stored_script_is_rendered_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut hostile = task(1, "Mallory", "2024-01-02");
    hostile.task_description = "<script>alert(1)</script>".to_string();
    let backend = MemoryBackend::with_tasks(vec![hostile]);
    let mut app = configured_app(&dir, &backend);
    app.load_tasks().await.unwrap();

    let html = render_html(&app.list_view());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}
