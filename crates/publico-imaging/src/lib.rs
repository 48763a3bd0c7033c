//! Image handling for publico.
//!
//! Three concerns live here:
//!
//! - **URL normalization**: rewriting third-party CDN URLs into inline
//!   transformation URLs (Cloudinary) or same-origin proxy paths
//!   (expiring-link stores), plus the explicit retry progression a client
//!   walks when an image fails to load.
//! - **Admission control**: a FIFO bounded-concurrency queue protecting the
//!   process from decode/encode pile-ups.
//! - **The transform pipeline**: parameter clamping and format negotiation,
//!   deterministic cache validators, upstream fetch, and the
//!   decode-resize-encode path built on the `image` crate.

#![deny(unused_crate_dependencies)]

mod error;
mod etag;
mod fetch;
mod normalize;
mod pipeline;
mod queue;
mod retry;
mod transform;

pub use error::{ImagingError, ImagingResult};
pub use etag::compute_validator;
pub use fetch::{FetchedImage, ReqwestFetcher, UpstreamFetcher};
pub use normalize::{NormalizeConfig, NormalizeOptions, force_proxy_url, normalize_image_url};
pub use pipeline::{ProcessedImage, process};
pub use queue::{AdmissionQueue, SlotGuard};
pub use retry::ImageSource;
pub use transform::{
    AVIF_MAX_QUALITY, DEFAULT_QUALITY, MAX_WIDTH, OutputFormat, ResolvedTransform,
    TransformRequest, WEBP_MAX_QUALITY, WIDE_REQUEST_THRESHOLD, resolve,
};
