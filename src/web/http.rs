//! Just enough HTTP/1.1 to serve a form: one request per connection,
//! `Content-Length` bodies only.

use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::string::{String, ToString};
use std::vec::Vec;

pub const MAX_LINE: usize = 8 * 1024;
pub const MAX_HEADERS: usize = 100;
pub const MAX_BODY: usize = 1024 * 1024;

#[derive(Debug)]
pub enum HttpError {
    /// Connection closed before a complete request arrived
    Incomplete,
    InvalidRequestLine,
    InvalidHeader,
    /// Header line or header count over the limit
    HeadersTooLarge,
    /// Declared body over [`MAX_BODY`]
    BodyTooLarge,
    Io(io::Error),
}

impl HttpError {
    /// Status to answer with, if the connection is still usable.
    pub fn status(&self) -> Option<Status> {
        match self {
            HttpError::Incomplete | HttpError::Io(_) => None,
            HttpError::BodyTooLarge => Some(Status::PayloadTooLarge),
            _ => Some(Status::BadRequest),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpError::Incomplete => f.pad("incomplete request"),
            HttpError::InvalidRequestLine => f.pad("invalid request line"),
            HttpError::InvalidHeader => f.pad("invalid header"),
            HttpError::HeadersTooLarge => f.pad("headers too large"),
            HttpError::BodyTooLarge => f.pad("body too large"),
            HttpError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        HttpError::Io(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path without the query string
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// First header named `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Read one request from `reader`.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, HttpError> {
        let line = read_line(reader)?.ok_or(HttpError::Incomplete)?;
        let mut parts = line.split(' ');
        let (method, target, version) = match (parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(t), Some(v)) if !m.is_empty() && t.starts_with('/') => (m, t, v),
            _ => return Err(HttpError::InvalidRequestLine),
        };
        if parts.next().is_some() {
            return Err(HttpError::InvalidRequestLine);
        }
        if !version.starts_with("HTTP/1.") {
            return Err(HttpError::InvalidRequestLine);
        }
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        };

        let mut headers = Vec::new();
        loop {
            let line = read_line(reader)?.ok_or(HttpError::Incomplete)?;
            if line.is_empty() {
                break;
            }
            if headers.len() == MAX_HEADERS {
                return Err(HttpError::HeadersTooLarge);
            }
            let (name, value) = line.split_once(':').ok_or(HttpError::InvalidHeader)?;
            if name.is_empty() || name.contains(' ') {
                return Err(HttpError::InvalidHeader);
            }
            headers.push((name.to_string(), value.trim().to_string()));
        }

        let mut request = Request {
            method: method.to_string(),
            path,
            query,
            headers,
            body: Vec::new(),
        };
        let length = match request.header("content-length") {
            Some(x) => x.parse::<usize>().map_err(|_| HttpError::InvalidHeader)?,
            None => 0,
        };
        if length > MAX_BODY {
            return Err(HttpError::BodyTooLarge);
        }
        request.body.resize(length, 0);
        reader.read_exact(&mut request.body).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => HttpError::Incomplete,
            _ => HttpError::Io(e),
        })?;
        Ok(request)
    }
}

/// Read a CRLF- or LF-terminated line, without the terminator. `None` on a
/// clean end of stream.
fn read_line(reader: &mut impl BufRead) -> Result<Option<String>, HttpError> {
    let mut buf = Vec::new();
    let read = reader.by_ref().take(MAX_LINE as u64 + 1).read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') {
        return Err(match buf.len() > MAX_LINE {
            true => HttpError::HeadersTooLarge,
            false => HttpError::Incomplete,
        });
    }
    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| HttpError::InvalidHeader)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    InternalServerError,
}

impl Status {
    pub fn code(&self) -> u16 {
        match *self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::PayloadTooLarge => 413,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match *self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::PayloadTooLarge => "Payload Too Large",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: Status, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    pub fn html(status: Status, body: String) -> Self {
        Self::new(status, "text/html; charset=utf-8", body)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "HTTP/1.1 {}\r\n", self.status)?;
        for (name, value) in &self.headers {
            write!(out, "{}: {}\r\n", name, value)?;
        }
        write!(out, "Content-Length: {}\r\n", self.body.len())?;
        out.write_all(b"Connection: close\r\n\r\n")?;
        out.write_all(&self.body)?;
        out.flush()
    }
}
