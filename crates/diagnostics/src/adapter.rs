use std::ffi::CStr;
use vkloc_core::Location;

/// Maps a fully specified [`Location`] to the VUID that governs it.
///
/// Resolvers report "none found" by returning [`vkloc_core::VUID_UNDEFINED`]
/// (or any sentinel of their choosing); callers never interpret the result.
pub trait VuidResolver {
    /// The VUID for `loc`.
    fn resolve(&self, loc: &Location) -> &str;
}

impl<F> VuidResolver for F
where
    F: Fn(&Location) -> &'static str,
{
    fn resolve(&self, loc: &Location) -> &str {
        self(loc)
    }
}

/// Pairs a [`Location`] with a [`VuidResolver`].
///
/// Both views borrow: `func_name` from the static name tables, `vuid` from the
/// resolver. Neither may outlive the adapter.
#[derive(Debug, Clone)]
pub struct LocationVuidAdapter<'l, R> {
    loc: &'l Location,
    resolver: R,
}

impl<'l, R: VuidResolver> LocationVuidAdapter<'l, R> {
    /// Adapter over `loc`, resolving with `resolver`.
    pub const fn new(loc: &'l Location, resolver: R) -> Self {
        Self { loc, resolver }
    }

    /// Name of the API call the location belongs to.
    pub const fn func_name(&self) -> &'static str {
        self.loc.string_func()
    }

    /// [`func_name`](Self::func_name) as a NUL-terminated string.
    pub const fn func_name_c(&self) -> &'static CStr {
        self.loc.c_str_func()
    }

    /// VUID for the held location.
    pub fn vuid(&self) -> &str {
        self.resolver.resolve(self.loc)
    }

    /// The held location.
    pub const fn location(&self) -> &'l Location {
        self.loc
    }
}
