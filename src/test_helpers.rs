//! Shared test utilities for the og-images test suite.
//!
//! Provides fixture setup, small image and post writers, and a one-shot HTTP
//! server for driving the real Gemini client without the network.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let settings = test_settings(tmp.path());
//! let posts = scan_posts(&settings.blog_dir(), &settings.og_dir()).unwrap();
//! assert_eq!(slugs(&posts), vec!["hello-world", "napkin-sketches", "untitled-notes"]);
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::thread::JoinHandle;
use tempfile::TempDir;

use crate::config::{GeneratorConfig, Settings};
use crate::posts::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// The copy has the default layout: posts under `src/content/blog/` and the
/// logo at `public/safari-pinned-tab.svg`. No style reference, no outputs.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Default config rooted at `root`, with a dummy credential.
pub fn test_settings(root: &Path) -> Settings {
    Settings::new(root, GeneratorConfig::default(), "test-key")
}

// =========================================================================
// Posts
// =========================================================================

/// Write `<dir>/<filename>` with `header` as its frontmatter block.
pub fn write_post(dir: &Path, filename: &str, header: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(filename),
        format!("---\n{header}\n---\n\nBody text.\n"),
    )
    .unwrap();
}

pub fn slugs(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

// =========================================================================
// Images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// PNG-encoded gradient, as the API would return it.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(gradient(width, height))
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::write(path, png_bytes(width, height)).unwrap();
}

pub fn write_solid_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// JPEG content regardless of the extension in `path`.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

/// A black square filling its whole viewBox, like a single-color pinned-tab icon.
pub fn write_logo_svg(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(
        path,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16"><path d="M0 0H16V16H0Z" fill="#000"/></svg>"##,
    )
    .unwrap();
}

// =========================================================================
// HTTP
// =========================================================================

/// A successful `generateContent` body carrying `image` as inline data.
pub fn image_response_json(image: &[u8]) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "Here is your image" },
                    { "inlineData": { "mimeType": "image/png", "data": STANDARD.encode(image) } }
                ]
            }
        }]
    })
    .to_string()
}

/// Serve exactly one request on a random local port.
///
/// Returns a `generateContent` URL pointing at the server and a handle that
/// yields the raw request (head and body) once the response has been sent.
pub fn serve_once(status_line: &str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!(
        "http://{}/v1beta/models/test-model:generateContent",
        listener.local_addr().unwrap()
    );
    let status_line = status_line.to_string();

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    (url, handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut raw = String::new();
    let mut content_length = 0;
    let mut chunked = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let lower = line.to_ascii_lowercase();
        if let Some(value) = lower.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
        if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
            chunked = true;
        }
        raw.push_str(&line);
        if line == "\r\n" {
            break;
        }
    }

    let body = if chunked {
        read_chunked(&mut reader)
    } else {
        let mut buf = vec![0; content_length];
        reader.read_exact(&mut buf).unwrap();
        buf
    };
    raw.push_str(&String::from_utf8_lossy(&body));
    raw
}

fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).unwrap();
        let size = usize::from_str_radix(size_line.trim(), 16).unwrap_or(0);
        let mut chunk = vec![0; size + 2];
        reader.read_exact(&mut chunk).unwrap();
        if size == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..size]);
    }
    body
}
