use crate::backend::{DctBackend, JpegBackend};
use crate::errors::DecodeErrors;
use crate::options::DecoderOptions;

/// Per call decoding state
///
/// One context is created for every decode and dropped when the decode
/// returns, whichever way it returns. Contexts are never shared between
/// calls.
pub struct Context<B: JpegBackend = DctBackend>
{
    backend: B,
    options: DecoderOptions,
}

impl Context<DctBackend>
{
    /// Create a context using the default backend
    ///
    /// # Errors
    /// `Context` if the options are invalid
    pub fn new(options: DecoderOptions) -> Result<Context<DctBackend>, DecodeErrors>
    {
        Context::with_backend(DctBackend, options)
    }
}

impl<B: JpegBackend> Context<B>
{
    /// Create a context around a custom backend
    ///
    /// # Errors
    /// `Context` if the options are invalid
    pub fn with_backend(backend: B, options: DecoderOptions) -> Result<Context<B>, DecodeErrors>
    {
        options.validate()?;
        trace!("Created decoding context");

        Ok(Context { backend, options })
    }

    /// The decoder doing the actual work
    #[must_use]
    pub fn backend(&self) -> &B
    {
        &self.backend
    }

    /// Options this context was created with
    #[must_use]
    pub fn options(&self) -> &DecoderOptions
    {
        &self.options
    }
}

impl<B: JpegBackend> Drop for Context<B>
{
    fn drop(&mut self)
    {
        trace!("Released decoding context");
    }
}
