//! Domain model (endpoint, store type, value envelope, time, metadata, errors).
//!
//! 外部 I/O を持たない純粋なデータ型と関数だけを置きます。

pub mod endpoint;
pub mod errors;
pub mod metadata;
pub mod store_type;
pub mod time;
pub mod value;

pub use self::endpoint::Endpoint;
pub use self::errors::{ConstructionError, StoreError};
pub use self::metadata::{DatasourceMetadata, RelValPair};
pub use self::store_type::StoreType;
pub use self::time::{format_timestamp, time_to_timestamp, timestamp_to_time};
pub use self::value::ValueEnvelope;
