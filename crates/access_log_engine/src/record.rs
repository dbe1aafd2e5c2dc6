/// A single request, as parsed from one line of an access log.
///
/// Every field is optional: a line that does not match the log grammar is
/// still represented by a `RequestRecord`, just with all fields set to `None`.
/// Such records are counted as failed requests further down the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestRecord {
    /// The host that performed the request.
    pub host: Option<String>,
    /// The HTTP verb that was used for the request.
    pub http_verb: Option<String>,
    /// The resource (path) that was requested.
    pub resource: Option<String>,
    /// The response status code, as it appeared in the log.
    pub response_code: Option<String>,
}

impl RequestRecord {
    /// Returns `true` if the response code is a `2xx` or `3xx` status.
    pub fn is_successful(&self) -> bool {
        self.response_code
            .as_deref()
            .is_some_and(|code| code.starts_with(['2', '3']))
    }

    /// Returns `true` if at least one field could be extracted from the line.
    pub fn has_any_field(&self) -> bool {
        self.host.is_some()
            || self.http_verb.is_some()
            || self.resource.is_some()
            || self.response_code.is_some()
    }

    /// Returns `true` if the host is present and looks like a hostname or an
    /// IP address (i.e. it contains at least one `.`).
    pub fn is_host_valid(&self) -> bool {
        self.host.as_deref().is_some_and(|host| host.contains('.'))
    }

    pub fn is_http_verb_valid(&self) -> bool {
        self.http_verb.is_some()
    }

    pub fn is_resource_valid(&self) -> bool {
        self.resource.is_some()
    }

    pub fn is_response_code_valid(&self) -> bool {
        self.response_code.is_some()
    }
}
