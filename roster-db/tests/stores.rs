//! Store integration tests
//!
//! Require a PostgreSQL database:
//!   DATABASE_URL=postgres://... cargo test -p roster-db -- --ignored
//!
//! Every test creates its own uniquely named rows and only asserts about
//! those, so the tests can share one database and run concurrently.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Local, NaiveDate};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use roster_core::{Department, Employee, NewDepartment, NewEmployee, NewProject, Project};
use roster_db::{migrations, DbError, DepartmentStore, EmployeeStore, ProjectStore};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Store events are captured per test and shown on failure.
/// Set RUST_LOG=roster_db=debug to see row counts.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn pool() -> PgPool {
    init_tracing();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = roster_db::create_pool(&url)
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}

/// Suffix that keeps names unique across tests and test runs
fn tag() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("[{}-{}]", nanos, COUNTER.fetch_add(1, Ordering::SeqCst))
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn create_department(pool: &PgPool, name: &str) -> Department {
    DepartmentStore::new(pool)
        .create(NewDepartment::new(name))
        .await
        .expect("create department failed")
}

async fn create_employee(
    pool: &PgPool,
    first: &str,
    last: &str,
    department_id: Option<i64>,
    gender: char,
) -> Employee {
    EmployeeStore::new(pool)
        .create(NewEmployee {
            department_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            birth_date: date("1990-01-01"),
            hire_date: date("2015-06-01"),
            gender,
        })
        .await
        .expect("create employee failed")
}

async fn create_project(
    pool: &PgPool,
    name: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Project {
    ProjectStore::new(pool)
        .create(NewProject {
            name: name.to_string(),
            start_date: start,
            end_date: end,
        })
        .await
        .expect("create project failed")
}

async fn association_count(pool: &PgPool, project_id: i64, employee_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM project_employee WHERE project_id = $1 AND employee_id = $2",
    )
    .bind(project_id)
    .bind(employee_id)
    .fetch_one(pool)
    .await
    .expect("count query failed");
    count
}

fn sorted_ids(employees: &[Employee]) -> Vec<i64> {
    let mut ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids
}

// === Departments ===

#[tokio::test]
#[ignore = "requires database"]
async fn created_department_is_found_by_id() {
    let pool = pool().await;
    let store = DepartmentStore::new(&pool);
    let name = format!("Test Department {}", tag());

    let created = store.create(NewDepartment::new(&name)).await.unwrap();
    let found = store.get_by_id(created.id).await.unwrap();

    assert_eq!(found, Some(created.clone()));
    assert_eq!(created.name, name);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_department_id_is_none() {
    let pool = pool().await;
    let store = DepartmentStore::new(&pool);

    assert_eq!(store.get_by_id(-1).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_all_includes_created_departments() {
    let pool = pool().await;
    let t = tag();
    let d1 = create_department(&pool, &format!("Test Department 1 {}", t)).await;
    let d2 = create_department(&pool, &format!("Test Department 2 {}", t)).await;

    let all = DepartmentStore::new(&pool).list_all().await.unwrap();

    assert!(all.contains(&d1));
    assert!(all.contains(&d2));
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_finds_departments_containing_text() {
    let pool = pool().await;
    let t = tag();
    let d1 = create_department(&pool, &format!("Alpha {} Research", t)).await;
    let d2 = create_department(&pool, &format!("Beta {} Research", t)).await;
    let store = DepartmentStore::new(&pool);

    let both = store.search_by_name(&t).await.unwrap();
    assert_eq!(both.len(), 2);
    assert!(both.contains(&d1) && both.contains(&d2));

    let alpha = store.search_by_name(&format!("Alpha {}", t)).await.unwrap();
    assert_eq!(alpha, vec![d1]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_search_matches_every_department() {
    let pool = pool().await;
    let created = create_department(&pool, &format!("Anything {}", tag())).await;
    let store = DepartmentStore::new(&pool);

    let matched = store.search_by_name("").await.unwrap();

    assert!(matched.contains(&created));
    assert!(matched.len() >= 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_treats_wildcards_literally() {
    let pool = pool().await;
    let t = tag();
    let percent = create_department(&pool, &format!("Quota 100% {}", t)).await;
    create_department(&pool, &format!("Quota 1000 {}", t)).await;
    let store = DepartmentStore::new(&pool);

    let matched: Vec<Department> = store
        .search_by_name("100%")
        .await
        .unwrap()
        .into_iter()
        .filter(|d| d.name.contains(&t))
        .collect();

    assert_eq!(matched, vec![percent]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn save_renames_existing_department() {
    let pool = pool().await;
    let store = DepartmentStore::new(&pool);
    let mut department = create_department(&pool, &format!("Old Name {}", tag())).await;

    department.name = format!("Brand new test department name {}", tag());
    assert!(store.save(&department).await.unwrap());

    let found = store.get_by_id(department.id).await.unwrap().unwrap();
    assert_eq!(found.name, department.name);
}

#[tokio::test]
#[ignore = "requires database"]
async fn save_unknown_department_is_noop() {
    let pool = pool().await;
    let store = DepartmentStore::new(&pool);
    let ghost = Department {
        id: -1,
        name: "Nobody".to_string(),
    };

    assert!(!store.save(&ghost).await.unwrap());
}

// === Employees ===

#[tokio::test]
#[ignore = "requires database"]
async fn list_all_maps_full_employee() {
    let pool = pool().await;
    let dept = create_department(&pool, &format!("Staff {}", tag())).await;
    let created = create_employee(&pool, "test_first", "test_last", Some(dept.id), 'M').await;

    let all = EmployeeStore::new(&pool).list_all().await.unwrap();
    let found = all.into_iter().find(|e| e.id == created.id).unwrap();

    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_requires_both_names_to_match() {
    let pool = pool().await;
    let t = tag();
    let first1 = format!("first_{}_1", t);
    let first2 = format!("first_{}_2", t);
    let e1 = create_employee(&pool, &first1, &format!("last_{}_1", t), None, 'M').await;
    let e2 = create_employee(&pool, &first2, &format!("last_{}_2", t), None, 'F').await;
    let store = EmployeeStore::new(&pool);

    let exact = store
        .search_by_name(&first1, &format!("last_{}_1", t))
        .await
        .unwrap();
    assert_eq!(exact, vec![e1.clone()]);

    // First name of one employee with the last name of the other
    let crossed = store
        .search_by_name(&first1, &format!("last_{}_2", t))
        .await
        .unwrap();
    assert!(crossed.is_empty());

    let by_tag = store.search_by_name(&t, &t).await.unwrap();
    assert_eq!(sorted_ids(&by_tag), sorted_ids(&[e1, e2]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_by_department_is_exact_and_disjoint() {
    let pool = pool().await;
    let t = tag();
    let d1 = create_department(&pool, &format!("Dept A {}", t)).await;
    let d2 = create_department(&pool, &format!("Dept B {}", t)).await;
    let e1 = create_employee(&pool, "a1", &t, Some(d1.id), 'M').await;
    let e2 = create_employee(&pool, "a2", &t, Some(d1.id), 'F').await;
    let e3 = create_employee(&pool, "b1", &t, Some(d2.id), 'F').await;
    let store = EmployeeStore::new(&pool);

    let in_d1 = store.list_by_department(d1.id).await.unwrap();
    let in_d2 = store.list_by_department(d2.id).await.unwrap();

    assert_eq!(sorted_ids(&in_d1), sorted_ids(&[e1, e2]));
    assert_eq!(sorted_ids(&in_d2), sorted_ids(&[e3]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_without_projects_excludes_any_membership() {
    let pool = pool().await;
    let t = tag();
    let project = create_project(&pool, &format!("Test Project {}", t), None, None).await;
    let assigned = create_employee(&pool, "assigned", &t, None, 'M').await;
    let free = create_employee(&pool, "free", &t, None, 'F').await;

    ProjectStore::new(&pool)
        .add_employee_to_project(project.id, assigned.id)
        .await
        .unwrap();

    let without = EmployeeStore::new(&pool).list_without_projects().await.unwrap();
    let ids = sorted_ids(&without);

    assert!(ids.binary_search(&free.id).is_ok());
    assert!(ids.binary_search(&assigned.id).is_err());
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_by_project_follows_association() {
    let pool = pool().await;
    let t = tag();
    let project = create_project(&pool, &format!("Members {}", t), None, None).await;
    let other = create_project(&pool, &format!("Others {}", t), None, None).await;
    let e1 = create_employee(&pool, "m1", &t, None, 'M').await;
    let e2 = create_employee(&pool, "m2", &t, None, 'F').await;
    let outsider = create_employee(&pool, "o1", &t, None, 'F').await;
    let projects = ProjectStore::new(&pool);

    projects.add_employee_to_project(project.id, e1.id).await.unwrap();
    projects.add_employee_to_project(project.id, e2.id).await.unwrap();
    projects.add_employee_to_project(other.id, outsider.id).await.unwrap();

    let members = EmployeeStore::new(&pool)
        .list_by_project(project.id)
        .await
        .unwrap();

    assert_eq!(sorted_ids(&members), sorted_ids(&[e1, e2]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn reassign_moves_employee_between_departments() {
    let pool = pool().await;
    let t = tag();
    let engineering = create_department(&pool, &format!("Engineering {}", t)).await;
    let other = create_department(&pool, &format!("Other {}", t)).await;
    let store = EmployeeStore::new(&pool);

    let ada = store
        .create(NewEmployee {
            department_id: Some(engineering.id),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            birth_date: date("1815-12-10"),
            hire_date: date("2010-01-01"),
            gender: 'F',
        })
        .await
        .unwrap();

    assert_eq!(
        store.list_by_department(engineering.id).await.unwrap(),
        vec![ada.clone()]
    );

    assert!(store.reassign_department(ada.id, other.id).await.unwrap());

    let moved = store.list_by_department(other.id).await.unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].id, ada.id);
    assert_eq!(moved[0].department_id, Some(other.id));
    assert!(store
        .list_by_department(engineering.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn reassign_unknown_employee_is_noop() {
    let pool = pool().await;
    let dept = create_department(&pool, &format!("Target {}", tag())).await;

    let updated = EmployeeStore::new(&pool)
        .reassign_department(-1, dept.id)
        .await
        .unwrap();

    assert!(!updated);
}

#[tokio::test]
#[ignore = "requires database"]
async fn reassign_to_unknown_department_surfaces_storage_error() {
    let pool = pool().await;
    let employee = create_employee(&pool, "fk", &tag(), None, 'M').await;

    let result = EmployeeStore::new(&pool)
        .reassign_department(employee.id, -1)
        .await;

    assert!(matches!(result, Err(DbError::Sqlx(_))));
}

#[tokio::test]
#[ignore = "requires database"]
async fn null_birth_date_is_mapping_failure() {
    let pool = pool().await;

    // The schema forbids NULL dates, so produce the row directly
    let row = sqlx::query(
        r#"
        SELECT 1::bigint AS employee_id, NULL::bigint AS department_id,
               'Ada'::text AS first_name, 'Lovelace'::text AS last_name,
               NULL::date AS birth_date, 'F'::text AS gender,
               '2010-01-01'::date AS hire_date
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let err = roster_db::row::employee_from_row(&row).unwrap_err();
    assert!(matches!(err, roster_db::RowError::UnexpectedNull { .. }));
}

// === Projects ===

#[tokio::test]
#[ignore = "requires database"]
async fn list_all_active_uses_strict_window() {
    let pool = pool().await;
    let t = tag();
    let today = Local::now().date_naive();

    let finished = create_project(
        &pool,
        &format!("Finished {}", t),
        Some(today - Duration::days(3650)),
        Some(today - Duration::days(365)),
    )
    .await;
    let running = create_project(
        &pool,
        &format!("Running {}", t),
        Some(today - Duration::days(30)),
        Some(today + Duration::days(30)),
    )
    .await;
    let open = create_project(&pool, &format!("Open {}", t), None, None).await;
    let no_start = create_project(
        &pool,
        &format!("No start {}", t),
        None,
        Some(today + Duration::days(30)),
    )
    .await;

    let active: Vec<i64> = ProjectStore::new(&pool)
        .list_all_active()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert!(active.contains(&running.id));
    assert!(active.contains(&open.id));
    assert!(!active.contains(&finished.id));
    assert!(!active.contains(&no_start.id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_all_active_on_fixed_date() {
    let pool = pool().await;
    let t = tag();
    let inactive = create_project(
        &pool,
        &format!("Test Project Inactive {}", t),
        Some(date("1900-01-01")),
        Some(date("2000-01-01")),
    )
    .await;
    let active = create_project(
        &pool,
        &format!("Test Project Active {}", t),
        Some(date("2010-01-01")),
        Some(date("2020-01-01")),
    )
    .await;
    let store = ProjectStore::new(&pool);

    let listed = store.list_all_active_on(date("2015-06-15")).await.unwrap();
    let found = listed.iter().find(|p| p.id == active.id).unwrap();

    assert_eq!(found, &active);
    assert!(listed.iter().all(|p| p.id != inactive.id));

    // Bounds are exclusive
    let on_start = store.list_all_active_on(date("2010-01-01")).await.unwrap();
    assert!(on_start.iter().all(|p| p.id != active.id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn created_project_is_found_by_id() {
    let pool = pool().await;
    let store = ProjectStore::new(&pool);
    let project = create_project(
        &pool,
        &format!("Lookup {}", tag()),
        Some(date("2010-01-01")),
        None,
    )
    .await;

    assert_eq!(store.get_by_id(project.id).await.unwrap(), Some(project));
    assert_eq!(store.get_by_id(-1).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires database"]
async fn add_employee_twice_leaves_one_row() {
    let pool = pool().await;
    let t = tag();
    let project = create_project(&pool, &format!("Twice {}", t), None, None).await;
    let employee = create_employee(&pool, "twice", &t, None, 'M').await;
    let store = ProjectStore::new(&pool);

    assert!(store.add_employee_to_project(project.id, employee.id).await.unwrap());
    assert!(!store.add_employee_to_project(project.id, employee.id).await.unwrap());

    assert_eq!(association_count(&pool, project.id, employee.id).await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn concurrent_adds_leave_one_row() {
    let pool = pool().await;
    let t = tag();
    let project = create_project(&pool, &format!("Race {}", t), None, None).await;
    let employee = create_employee(&pool, "race", &t, None, 'F').await;
    let (project_id, employee_id) = (project.id, employee.id);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move {
                ProjectStore::new(&pool)
                    .add_employee_to_project(project_id, employee_id)
                    .await
            })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        if handle.await.expect("task panicked").expect("add failed") {
            inserted += 1;
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(association_count(&pool, project_id, employee_id).await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn remove_employee_deletes_association() {
    let pool = pool().await;
    let t = tag();
    let project = create_project(&pool, &format!("Remove {}", t), None, None).await;
    let employee = create_employee(&pool, "leaver", &t, None, 'M').await;
    let store = ProjectStore::new(&pool);

    store.add_employee_to_project(project.id, employee.id).await.unwrap();
    assert!(store
        .remove_employee_from_project(project.id, employee.id)
        .await
        .unwrap());

    assert_eq!(association_count(&pool, project.id, employee.id).await, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn remove_missing_pair_is_noop() {
    let pool = pool().await;
    let t = tag();
    let project = create_project(&pool, &format!("Untouched {}", t), None, None).await;
    let member = create_employee(&pool, "member", &t, None, 'M').await;
    let stranger = create_employee(&pool, "stranger", &t, None, 'F').await;
    let store = ProjectStore::new(&pool);

    store.add_employee_to_project(project.id, member.id).await.unwrap();

    let removed = store
        .remove_employee_from_project(project.id, stranger.id)
        .await
        .unwrap();

    assert!(!removed);
    assert_eq!(association_count(&pool, project.id, member.id).await, 1);
}
