use driver::clock::SystemClock;
use driver::snapshot::JsonSnapshotStore;
use kernel::interface::clock::DependOnClock;
use kernel::interface::store::DependOnCatalogStore;

/// Wires the concrete driver implementations behind the service traits.
pub struct AppModule {
    clock: SystemClock,
    store: JsonSnapshotStore,
}

impl AppModule {
    pub fn init() -> Self {
        Self {
            clock: SystemClock,
            store: JsonSnapshotStore::from_env(),
        }
    }
}

impl DependOnClock for AppModule {
    type Clock = SystemClock;
    fn clock(&self) -> &SystemClock {
        &self.clock
    }
}

impl DependOnCatalogStore for AppModule {
    type CatalogStore = JsonSnapshotStore;
    fn catalog_store(&self) -> &JsonSnapshotStore {
        &self.store
    }
}
