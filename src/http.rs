#[cfg(test)]
pub(crate) mod test_server;

/// Status and body of a completed exchange, whatever the status was.
#[derive(Debug, Clone)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

pub(crate) fn post_json(
    agent: &ureq::Agent,
    url: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> Result<Reply, String> {
    let mut request = agent.post(url).set("Content-Type", "application/json");
    for (name, value) in headers {
        request = request.set(name, value);
    }
    into_reply(request.send_string(body))
}

pub(crate) fn get_text(
    agent: &ureq::Agent,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<Reply, String> {
    let mut request = agent.get(url);
    for (name, value) in headers {
        request = request.set(name, value);
    }
    into_reply(request.call())
}

// ureq reports 4xx/5xx as errors; callers classify statuses themselves.
fn into_reply(result: Result<ureq::Response, ureq::Error>) -> Result<Reply, String> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(format!("transport error: {err}")),
    };

    let status = response.status();
    // An unreadable body still leaves a usable status.
    let body = response.into_string().unwrap_or_default();
    Ok(Reply { status, body })
}
