//! Codec boundary for pipeline messages.

use crate::input::DelegatingInputStream;
use crate::output::DelegatingOutputStream;

/// A structured message that can stream itself through the pipeline.
///
/// The pipeline never interprets message contents: it only supplies
/// bounded chunks of bytes to `decode_from` and carries away the chunks
/// produced by `encode_to`. Codec failures are surfaced unchanged through
/// [`crate::PushDeserializer::join`] / [`crate::PullSerializer::join`].
pub trait Message: Sized + Send + 'static {
    /// Error type produced by the codec.
    type Error: std::error::Error + Send + 'static;

    /// Encode `self` into the write-side stream.
    ///
    /// The pipeline flushes the trailing partial chunk and emits the
    /// sentinel after this returns; codecs never write zero-length chunks
    /// themselves.
    fn encode_to(&self, stream: &mut DelegatingOutputStream) -> Result<(), Self::Error>;

    /// Decode a message from the read-side stream.
    ///
    /// The stream reports end of input once the producer has pushed the
    /// sentinel and the backlog is drained.
    fn decode_from(stream: &mut DelegatingInputStream) -> Result<Self, Self::Error>;
}
