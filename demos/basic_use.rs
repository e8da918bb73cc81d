use async_trait::async_trait;
use exif_gallery::bridge::{NativeBridge, NativeError, NativeInitOptions, PickResult};
use exif_gallery::filter::PickOptions;
use exif_gallery::{ExifGallery, GalleryError, InitConfig};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Prints what the native layer would receive instead of opening a real picker.
struct PrintingBridge;

#[async_trait]
impl NativeBridge for PrintingBridge {
    async fn initialize(&self, options: NativeInitOptions) -> Result<(), NativeError> {
        println!("initialize: {options:?}");
        Ok(())
    }

    async fn pick(&self, options: PickOptions) -> Result<PickResult, NativeError> {
        let wire = serde_json::to_string_pretty(&options)
            .map_err(|e| NativeError::new(e.to_string()))?;
        println!("pick:\n{wire}");
        Ok(PickResult::cancelled())
    }
}

#[tokio::main]
async fn main() -> Result<(), GalleryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let gallery = ExifGallery::builder().bridge(PrintingBridge).build();
    gallery
        .initialize(InitConfig::builder().locale("en").build())
        .await?;

    // A corridor along an encoded route, limited to one day.
    let result = gallery
        .pick(&json!({
            "filter": {
                "location": { "polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@", "radius": 2500 },
                "timeRange": { "start": "2024-06-01T00:00:00Z", "end": "2024-06-02T00:00:00Z" }
            },
            "distanceUnit": "miles"
        }))
        .await?;
    println!("cancelled: {}", result.cancelled);

    // Rejected before the native layer is reached.
    if let Err(err) = gallery
        .pick(&json!({ "filter": { "location": { "coordinates": [{ "lat": 91, "lng": 0 }] } } }))
        .await
    {
        println!("{} ({})", err, err.code());
    }

    Ok(())
}
