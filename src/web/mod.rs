//! The web form: `GET /` shows it, `POST /` renders the submitted text,
//! `/style/` serves stylesheets.

use std::env;
use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Read};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::string::{String, ToString};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::{Banner, FontCache};

pub mod form;
pub mod http;
pub mod page;

use form::Form;
use http::{Request, Response, Status};
use page::FormPage;

const FORM_TYPE: &str = "application/x-www-form-urlencoded";
/// Unread request bytes discarded after an error response.
const DRAIN: u64 = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: String,
    /// Directory holding the banner font files
    pub fonts: PathBuf,
    /// Directory served under `/style/`
    pub style: PathBuf,
    /// Keep fonts in memory after the first load
    pub cache: bool,
    pub read_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8000".to_string(),
            fonts: PathBuf::from("fonts"),
            style: PathBuf::from("style"),
            cache: true,
            read_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Defaults overridden by `BANNER_ADDR`, `BANNER_FONTS`, `BANNER_STYLE`,
    /// `BANNER_CACHE` and `BANNER_READ_TIMEOUT` (seconds).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(x) = var("BANNER_ADDR") {
            config.addr = x;
        }
        if let Some(x) = var("BANNER_FONTS") {
            config.fonts = x.into();
        }
        if let Some(x) = var("BANNER_STYLE") {
            config.style = x.into();
        }
        if let Some(x) = var("BANNER_CACHE") {
            config.cache = match x.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                _ => return Err(ConfigError { var: "BANNER_CACHE", value: x }),
            };
        }
        if let Some(x) = var("BANNER_READ_TIMEOUT") {
            let secs = x.parse::<u64>().ok().filter(|&s| s > 0);
            config.read_timeout = match secs {
                Some(secs) => Duration::from_secs(secs),
                None => return Err(ConfigError { var: "BANNER_READ_TIMEOUT", value: x }),
            };
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.var)
    }
}

impl std::error::Error for ConfigError {}

/// Request routing over a font cache and a style directory.
pub struct Site {
    fonts: FontCache,
    style: PathBuf,
}

impl Site {
    pub fn new(config: &Config) -> Self {
        let fonts = match config.cache {
            true => FontCache::new(&config.fonts),
            false => FontCache::uncached(&config.fonts),
        };
        Self {
            fonts,
            style: config.style.clone(),
        }
    }

    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    pub fn respond(&self, request: &Request) -> Response {
        if let Some(name) = request.path.strip_prefix("/style/") {
            return match request.method.as_str() {
                "GET" => self.style(name),
                _ => not_allowed("GET"),
            };
        }
        if request.path != "/" {
            return error(Status::NotFound);
        }
        match request.method.as_str() {
            "GET" => Response::html(Status::Ok, FormPage::default().to_html()),
            "POST" => self.submit(request),
            _ => not_allowed("GET, POST"),
        }
    }

    fn submit(&self, request: &Request) -> Response {
        let mut form = match request.header("content-type") {
            Some(x) if !is_form(x) => Form::default(),
            _ => Form::parse(&String::from_utf8_lossy(&request.body)),
        };
        if let Some(ref query) = request.query {
            form.merge(Form::parse(query));
        }

        let text = form.get("userText");
        if text.is_empty() {
            return error(Status::BadRequest);
        }
        let banner = Banner::from_selector(form.get("bannerType"));
        let font = match self.fonts.get(banner) {
            Ok(x) => x,
            Err(e) => {
                log::error!("{}", e);
                return error(Status::InternalServerError);
            }
        };
        let rows = font.render_text(text);
        log::debug!("rendered {} bytes as {} rows of {}", text.len(), rows.len(), banner);
        let page = FormPage {
            text,
            banner,
            rows: &rows,
        };
        Response::html(Status::Ok, page.to_html())
    }

    fn style(&self, name: &str) -> Response {
        let safe = !name.is_empty()
            && !name.contains('\\')
            && name
                .split('/')
                .all(|part| !part.is_empty() && part != "." && part != "..");
        if !safe {
            return error(Status::NotFound);
        }
        let path = self.style.join(name);
        match fs::read(&path) {
            Ok(bytes) => Response::new(Status::Ok, content_type(&path), bytes),
            Err(e) => {
                log::debug!("{}: {}", path.display(), e);
                error(Status::NotFound)
            }
        }
    }
}

/// Media types compare case-insensitively; parameters such as `charset`
/// may follow.
fn is_form(content_type: &str) -> bool {
    content_type
        .get(..FORM_TYPE.len())
        .map_or(false, |x| x.eq_ignore_ascii_case(FORM_TYPE))
}

fn error(status: Status) -> Response {
    Response::html(status, page::error(status))
}

fn not_allowed(allow: &str) -> Response {
    error(Status::MethodNotAllowed).with_header("Allow", allow)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|x| x.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// A bound listener plus the site it serves.
pub struct Server {
    listener: TcpListener,
    site: Arc<Site>,
    read_timeout: Duration,
}

impl Server {
    pub fn bind(config: &Config) -> io::Result<Self> {
        let listener = TcpListener::bind(&config.addr)?;
        let site = Site::new(config);
        if config.cache {
            site.fonts().preload();
        }
        Ok(Self {
            listener,
            site: Arc::new(site),
            read_timeout: config.read_timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever, one thread each.
    pub fn run(self) -> io::Result<()> {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(x) => x,
                Err(e) => {
                    log::warn!("accept failed: {}", e);
                    continue;
                }
            };
            let site = self.site.clone();
            let timeout = self.read_timeout;
            thread::spawn(move || {
                if let Err(e) = serve(&site, stream, timeout) {
                    log::warn!("connection failed: {}", e);
                }
            });
        }
        Ok(())
    }
}

fn serve(site: &Site, stream: TcpStream, timeout: Duration) -> io::Result<()> {
    stream.set_read_timeout(Some(timeout))?;
    let peer = stream.peer_addr()?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let (response, unread) = match Request::read_from(&mut reader) {
        Ok(request) => {
            let response = site.respond(&request);
            log::info!(
                "{} {} {} {}",
                peer,
                request.method,
                request.path,
                response.status.code()
            );
            (response, false)
        }
        Err(e) => match e.status() {
            Some(status) => {
                log::info!("{} bad request: {}", peer, e);
                (error(status), true)
            }
            None => {
                log::debug!("{} dropped: {}", peer, e);
                return Ok(());
            }
        },
    };
    response.write_to(&mut BufWriter::new(&stream))?;
    if unread {
        linger(&stream, &mut reader);
    }
    Ok(())
}

/// Half-close and discard what the client is still sending, so closing the
/// socket does not reset the connection before the response is read.
fn linger(stream: &TcpStream, reader: &mut impl BufRead) {
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        log::debug!("shutdown failed: {}", e);
        return;
    }
    let _ = io::copy(&mut reader.take(DRAIN), &mut io::sink());
}
