//! Values handed out before a restart are never handed out again.

use qcase_counter::{
    CounterSpace, CounterStore, FileDocumentStore, ScopeKey, TransactionalCounterStore,
};

#[tokio::test]
async fn values_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let k = ScopeKey::new("sohar_port_agricultural").unwrap();

    let before = {
        let store = TransactionalCounterStore::new(FileDocumentStore::open(tmp.path()).await.unwrap());
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(store.increment(CounterSpace::Transactions, &k).await.unwrap());
        }
        seen
    };
    assert_eq!(before, vec![1, 2, 3]);

    // Simulated restart: a brand-new store over the same directory
    let store = TransactionalCounterStore::new(FileDocumentStore::open(tmp.path()).await.unwrap());
    assert_eq!(store.current(CounterSpace::Transactions, &k).await.unwrap(), 3);
    assert_eq!(store.increment(CounterSpace::Transactions, &k).await.unwrap(), 4);
}

#[tokio::test]
async fn spaces_persist_to_separate_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let backend = FileDocumentStore::open(tmp.path()).await.unwrap();
    let transactions_path = backend.document_path(CounterSpace::Transactions);
    let samples_path = backend.document_path(CounterSpace::Samples);
    let store = TransactionalCounterStore::new(backend);
    let k = ScopeKey::new("salalah_port_veterinary").unwrap();

    store.increment(CounterSpace::Transactions, &k).await.unwrap();
    store.increment(CounterSpace::Samples, &k).await.unwrap();
    store.increment(CounterSpace::Samples, &k).await.unwrap();

    let tx: serde_json::Value =
        serde_json::from_slice(&std::fs::read(transactions_path).unwrap()).unwrap();
    let samples: serde_json::Value =
        serde_json::from_slice(&std::fs::read(samples_path).unwrap()).unwrap();

    assert_eq!(tx["values"]["salalah_port_veterinary"], 1);
    assert_eq!(samples["values"]["salalah_port_veterinary"], 2);
}
