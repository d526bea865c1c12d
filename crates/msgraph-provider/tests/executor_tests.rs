//! Table resolution tests.
//!
//! Exercise the executor against in-memory resolvers:
//! - Paged fetches keep item order
//! - Relations are expanded once per parent row
//! - Contract violations and resolver failures abort the table

use async_trait::async_trait;
use msgraph_provider::executor::{resolve_table, CHANNEL_CAPACITY};
use msgraph_provider::prelude::*;
use msgraph_provider::ROW_ID_COLUMN;
use serde_json::{json, Value};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
enum Node {
    Parent(Value),
    Child(Value),
}

impl Item for Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::Parent(_) => "Parent",
            Node::Child(_) => "Child",
        }
    }

    fn document(&self) -> ProviderResult<Value> {
        match self {
            Node::Parent(v) | Node::Child(v) => Ok(v.clone()),
        }
    }
}

/// Emits pre-built pages, optionally failing after a number of pages.
struct Pages {
    pages: Vec<Vec<Node>>,
    fail_after: Option<usize>,
}

impl Pages {
    fn new(pages: Vec<Vec<Node>>) -> Self {
        Self {
            pages,
            fail_after: None,
        }
    }
}

#[async_trait]
impl FetchResolver<(), Node> for Pages {
    async fn fetch(
        &self,
        _client: &(),
        _parent: Option<&Resource<Node>>,
        tx: mpsc::Sender<Node>,
    ) -> ProviderResult<()> {
        for (i, page) in self.pages.iter().enumerate() {
            if self.fail_after == Some(i) {
                return Err(ProviderError::fetch(
                    "parents",
                    std::io::Error::new(std::io::ErrorKind::Other, "page request failed"),
                ));
            }
            emit("parents", &tx, page.iter().cloned()).await?;
        }
        Ok(())
    }
}

/// Fails every write after the first `accept` rows.
struct FailingSink {
    accept: usize,
    written: usize,
}

#[async_trait]
impl ResourceSink<Node> for FailingSink {
    async fn write(&mut self, _resource: &Resource<Node>) -> ProviderResult<()> {
        if self.written >= self.accept {
            return Err(ProviderError::Sink {
                message: "disk full".to_string(),
                source: None,
            });
        }
        self.written += 1;
        Ok(())
    }
}

fn parent(id: &str, children: Value) -> Node {
    Node::Parent(json!({ "id": id, "children": children }))
}

fn extract_children(_: &(), resource: &Resource<Node>) -> ProviderResult<Vec<Node>> {
    let document = resource.item().document()?;
    Ok(document["children"]
        .as_array()
        .map(|children| children.iter().cloned().map(Node::Child).collect())
        .unwrap_or_default())
}

fn id_length(_: &(), resource: &Resource<Node>) -> ProviderResult<ColumnValue> {
    let len = resource
        .get("id")
        .and_then(ColumnValue::as_str)
        .map_or(0, str::len);
    Ok(ColumnValue::BigInt(len as i64))
}

fn children_table() -> Table<(), Node> {
    Table::extracted("parent_children", "Child", extract_children).with_columns([
        Column::new("parent_cq_id", ColumnType::Uuid).parent_id(),
        Column::new("name", ColumnType::String),
        Column::new("rank", ColumnType::Int),
    ])
}

fn parents_table(resolver: Pages) -> Table<(), Node> {
    Table::fetched("parents", "Parent", resolver)
        .with_columns([
            Column::new("id", ColumnType::String),
            Column::new("id_length", ColumnType::BigInt).func(id_length),
            Column::new("missing", ColumnType::Json),
        ])
        .with_relation(children_table())
}

fn ids(sink: &MemorySink, table: &str) -> Vec<String> {
    sink.table(table)
        .map(|r| r.get("id").and_then(Value::as_str).unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_paged_fetch_keeps_order() {
    let pages = vec![
        vec![
            parent("g1", json!([])),
            parent("g2", json!([])),
            parent("g3", json!([])),
        ],
        vec![parent("g4", json!([])), parent("g5", json!([]))],
    ];
    let table = parents_table(Pages::new(pages));
    let mut sink = MemorySink::new();

    let rows = resolve_table(&table, &(), None, &mut sink).await.unwrap();

    assert_eq!(rows, 5);
    assert_eq!(ids(&sink, "parents"), vec!["g1", "g2", "g3", "g4", "g5"]);
}

#[tokio::test]
async fn test_columns_resolve_from_path_function_and_absent_fields() {
    let table = parents_table(Pages::new(vec![vec![parent("abcd", json!([]))]]));
    let mut sink = MemorySink::new();
    resolve_table(&table, &(), None, &mut sink).await.unwrap();

    let row = &sink.rows()[0];
    assert_eq!(row.get("id"), Some(&json!("abcd")));
    assert_eq!(row.get("id_length"), Some(&json!(4)));
    assert_eq!(row.get("missing"), Some(&Value::Null));
    assert_eq!(row.get(ROW_ID_COLUMN), Some(&json!(row.cq_id.to_string())));
    assert!(row.parent_cq_id.is_none());
}

#[tokio::test]
async fn test_relations_expand_per_parent() {
    let pages = vec![vec![
        parent(
            "g1",
            json!([{"name": "a", "rank": 1}, {"name": "b", "rank": 2}]),
        ),
        parent("g2", json!([])),
        parent("g3", json!([{"name": "c", "rank": "high"}])),
    ]];
    let table = parents_table(Pages::new(pages));
    let mut sink = MemorySink::new();

    let rows = resolve_table(&table, &(), None, &mut sink).await.unwrap();
    assert_eq!(rows, 6);

    let parents: Vec<_> = sink.table("parents").collect();
    let g1_children: Vec<_> = sink.children("parent_children", parents[0].cq_id).collect();
    assert_eq!(g1_children.len(), 2);
    assert_eq!(g1_children[0].get("name"), Some(&json!("a")));
    assert_eq!(
        g1_children[0].get("parent_cq_id"),
        Some(&json!(parents[0].cq_id.to_string()))
    );
    assert_eq!(sink.children("parent_children", parents[1].cq_id).count(), 0);

    // A value of the wrong JSON type projects to null instead of failing.
    let g3_children: Vec<_> = sink.children("parent_children", parents[2].cq_id).collect();
    assert_eq!(g3_children[0].get("rank"), Some(&Value::Null));
}

#[tokio::test]
async fn test_rows_are_written_parent_before_children() {
    let pages = vec![vec![
        parent("g1", json!([{"name": "a"}])),
        parent("g2", json!([{"name": "b"}])),
    ]];
    let table = parents_table(Pages::new(pages));
    let mut sink = MemorySink::new();
    resolve_table(&table, &(), None, &mut sink).await.unwrap();

    let order: Vec<_> = sink.rows().iter().map(|r| r.table).collect();
    assert_eq!(
        order,
        vec!["parents", "parent_children", "parents", "parent_children"]
    );
}

#[tokio::test]
async fn test_wrong_item_kind_is_type_mismatch() {
    let pages = vec![vec![Node::Child(json!({"name": "stray"}))]];
    let table = parents_table(Pages::new(pages));
    let mut sink = MemorySink::new();

    let err = resolve_table(&table, &(), None, &mut sink).await.unwrap_err();

    assert!(err.is_contract_violation());
    assert!(
        matches!(err, ProviderError::TypeMismatch { ref expected, ref found, .. } if expected == "Parent" && found == "Child")
    );
    assert!(sink.rows().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_keeps_rows_already_written() {
    let pages = vec![
        vec![parent("g1", json!([])), parent("g2", json!([]))],
        vec![parent("g3", json!([]))],
    ];
    let mut resolver = Pages::new(pages);
    resolver.fail_after = Some(1);
    let table = parents_table(resolver);
    let mut sink = MemorySink::new();

    let err = resolve_table(&table, &(), None, &mut sink).await.unwrap_err();

    assert!(matches!(err, ProviderError::Fetch { .. }));
    assert_eq!(ids(&sink, "parents"), vec!["g1", "g2"]);
}

#[tokio::test]
async fn test_sink_failure_stops_producer() {
    let items: Vec<_> = (0..CHANNEL_CAPACITY * 4)
        .map(|i| parent(&format!("g{i}"), json!([])))
        .collect();
    let table = parents_table(Pages::new(vec![items]));
    let mut sink = FailingSink {
        accept: 3,
        written: 0,
    };

    let err = resolve_table(&table, &(), None, &mut sink).await.unwrap_err();

    assert!(matches!(err, ProviderError::Sink { .. }));
    assert_eq!(sink.written, 3);
}

#[tokio::test]
async fn test_provider_sync_reports_failed_resources() {
    let good = parents_table(Pages::new(vec![vec![parent("g1", json!([{"name": "a"}]))]]));
    let bad = Table::fetched(
        "strays",
        "Parent",
        Pages::new(vec![vec![Node::Child(json!({}))]]),
    )
    .with_column(Column::new("id", ColumnType::String));

    let provider = Provider::new("test", "0.1.0")
        .with_resource("ad.groups", good)
        .and_then(|p| p.with_resource("ad.strays", bad))
        .unwrap();

    let mut sink = MemorySink::new();
    let summary = provider.sync(&(), &["*"], &mut sink).await.unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.total_rows(), 2);
    let failed: Vec<_> = summary.failed().map(|o| o.resource).collect();
    assert_eq!(failed, vec!["ad.strays"]);
    assert_eq!(sink.rows().len(), 2);
}

#[tokio::test]
async fn test_provider_sync_counts_rows_before_failure() {
    let pages = vec![
        vec![parent("g1", json!([{"name": "a"}])), parent("g2", json!([]))],
        vec![parent("g3", json!([]))],
    ];
    let mut resolver = Pages::new(pages);
    resolver.fail_after = Some(1);
    let provider = Provider::new("test", "0.1.0")
        .with_resource("ad.groups", parents_table(resolver))
        .unwrap();

    let mut sink = MemorySink::new();
    let summary = provider.sync(&(), &["ad.groups"], &mut sink).await.unwrap();

    assert!(!summary.is_success());
    let outcome = &summary.outcomes[0];
    assert!(matches!(outcome.error, Some(ProviderError::Fetch { .. })));
    assert_eq!(outcome.rows, 3);
    assert_eq!(summary.total_rows(), sink.rows().len() as u64);
}

#[tokio::test]
async fn test_provider_sync_unknown_resource_fetches_nothing() {
    let provider = Provider::new("test", "0.1.0")
        .with_resource(
            "ad.groups",
            parents_table(Pages::new(vec![vec![parent("g1", json!([]))]])),
        )
        .unwrap();

    let mut sink = MemorySink::new();
    let err = provider
        .sync(&(), &["ad.groups", "ad.users"], &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ResourceNotFound { .. }));
    assert!(sink.rows().is_empty());
}
