use crate::catalog::Catalog;
use crate::CatalogError;

/// Snapshot persistence boundary. The driver owns the on-disk format; the
/// kernel only requires that a catalog round-trips whole.
pub trait CatalogStore: 'static {
    fn load(&self) -> error_stack::Result<Catalog, CatalogError>;
    fn save(&self, catalog: &Catalog) -> error_stack::Result<(), CatalogError>;
}

pub trait DependOnCatalogStore: 'static {
    type CatalogStore: CatalogStore;
    fn catalog_store(&self) -> &Self::CatalogStore;
}

impl<T> DependOnCatalogStore for T
where
    T: CatalogStore,
{
    type CatalogStore = T;
    fn catalog_store(&self) -> &Self::CatalogStore {
        self
    }
}
