//! Accept-Encoding に応じて圧縮済みのページを配信するサーバーの例 (tokio)
//!
//! ページは gzip 圧縮した状態で保持し、リクエストごとに圧縮し直すことはない。
//! gzip を受け入れないクライアントには、identity が受け入れ可能であれば展開して返す。
//!
//! 使い方:
//!   cargo run -p accept_encoding_server
//!
//!   curl -v -H 'Accept-Encoding: gzip' http://localhost:8080/ --output -
//!   curl -v -H 'Accept-Encoding: br' http://localhost:8080/
//!   curl -v -H 'Accept-Encoding: identity;q=0, br' http://localhost:8080/

use std::io::{Read, Write};
use std::sync::Arc;

use flate2::Compression;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::GzEncoder;
use shiguredo_accept_encoding::negotiate::{self, Negotiation};
use shiguredo_accept_encoding::{Encoding, parse};
use shiguredo_http11::{Request, RequestDecoder, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>shiguredo_accept_encoding Server</title></head>
<body>
<h1>Welcome to shiguredo_accept_encoding Server</h1>
<p>This page is stored gzip compressed.</p>
<p>Clients that do not accept gzip receive it decompressed.</p>
</body>
</html>
"#;

struct ServerOptions {
    port: u16,
}

/// 圧縮済みで保持している表現
struct StoredContent {
    content_type: &'static str,
    encoding: Encoding,
    body: Vec<u8>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let content = Arc::new(StoredContent {
        content_type: "text/html; charset=utf-8",
        encoding: Encoding::Gzip,
        body: gzip(INDEX_HTML.as_bytes())?,
    });
    println!(
        "Stored index.html as {} ({} -> {} bytes)",
        content.encoding,
        INDEX_HTML.len(),
        content.body.len()
    );

    let addr = format!("0.0.0.0:{}", options.port);
    let listener = TcpListener::bind(&addr).await?;
    println!("HTTP server listening on http://{}", addr);

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let content = content.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, peer_addr, &content).await {
                eprintln!("Client error: {}", e);
            }
        });
    }
}

fn parse_args() -> Result<ServerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "accept_encoding_server";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("8080")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ServerOptions { port })
}

async fn handle_client(
    mut stream: TcpStream,
    peer_addr: std::net::SocketAddr,
    content: &StoredContent,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("Connection from {}", peer_addr);

    let mut decoder = RequestDecoder::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            println!("Connection closed by {}", peer_addr);
            break;
        }

        decoder.feed(&buf[..n])?;

        while let Some(request) = decoder.decode()? {
            println!(
                "{} {} {} from {}",
                request.method, request.uri, request.version, peer_addr
            );

            let response = build_response(&request, content)?;
            println!("  -> {} {}", response.status_code, response.reason_phrase);
            stream.write_all(&response.encode()).await?;

            if !request.is_keep_alive() {
                println!("Connection close requested by {}", peer_addr);
                return Ok(());
            }
        }
    }

    Ok(())
}

fn build_response(request: &Request, content: &StoredContent) -> std::io::Result<Response> {
    if request.uri != "/" {
        return Ok(Response::new(404, "Not Found")
            .header("Content-Type", "text/plain")
            .body(b"404 Not Found\n".to_vec()));
    }

    // 複数の Accept-Encoding はカンマで連結したものと同じ意味になる
    let accept_encoding = request.get_headers("Accept-Encoding").join(", ");
    let accepted = parse(&accept_encoding);
    let negotiation = negotiate::negotiate(accepted, content.encoding);
    println!(
        "  Accept-Encoding: {:?} -> [{}] -> {:?}",
        accept_encoding, accepted, negotiation
    );

    let body = match negotiation {
        Negotiation::Encoded(_) => content.body.clone(),
        Negotiation::Decoded => decode(content.encoding, &content.body)?,
        Negotiation::NotAcceptable => {
            return Ok(Response::new(406, "Not Acceptable")
                .header("Vary", negotiate::VARY)
                .header("Content-Type", "text/plain")
                .body(b"406 Not Acceptable\n".to_vec()));
        }
    };

    let mut response = Response::new(200, "OK")
        .header("Vary", negotiate::VARY)
        .header("Content-Type", content.content_type);
    if let Some(value) = negotiation.encoding().and_then(negotiate::content_encoding) {
        response = response.header("Content-Encoding", value);
    }

    // HEAD ではボディを送らず、GET と同じ Content-Length を返す
    if request.method == "HEAD" {
        return Ok(response
            .omit_content_length(true)
            .header("Content-Length", &body.len().to_string()));
    }
    Ok(response.body(body))
}

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

/// 保持している表現を identity に展開する
fn decode(encoding: Encoding, data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoded = Vec::new();
    match encoding {
        Encoding::Gzip => {
            GzDecoder::new(data).read_to_end(&mut decoded)?;
        }
        // HTTP の deflate は zlib 形式
        Encoding::Deflate => {
            ZlibDecoder::new(data).read_to_end(&mut decoded)?;
        }
        // identity で保持している場合は negotiate が Decoded を返さない
        Encoding::Identity | Encoding::Compress | Encoding::Brotli => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("cannot decode {} content", encoding),
            ));
        }
    }
    Ok(decoded)
}
