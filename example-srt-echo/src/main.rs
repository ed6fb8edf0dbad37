use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    time::Duration,
};

use srt_io::{
    nonblocking::{read_result, write_result},
    retry::{retry_while_blocked, Configuration},
    IoResult,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let listener = TcpListener::bind("127.0.0.1:9000")?;
    listener.set_nonblocking(true)?;
    log::info!("echoing on {}", listener.local_addr()?);

    let mut configuration = Configuration::default();
    configuration.max_attempts(1000);
    configuration.backoff(Duration::from_millis(10));

    loop {
        if let Some((stream, address)) =
            next_connection(&configuration, || listener.accept())
        {
            log::info!("new connection from {address:?}");
            let configuration = configuration.clone();
            std::thread::spawn(move || {
                if let Err(e) = echo(stream, &configuration) {
                    log::error!("connection from {address:?} failed: {e}");
                }
            });
        }
    }
}

/// How long to hold off accepting after a hard accept failure, such as EMFILE.
const ACCEPT_FAILURE_BACKOFF: Duration = Duration::from_millis(100);

/// A failed accept is logged rather than returned: the listener is still good.
fn next_connection<S>(
    configuration: &Configuration,
    mut accept: impl FnMut() -> std::io::Result<S>,
) -> Option<S> {
    match retry_while_blocked(configuration, || read_result(accept(), "accept")) {
        Ok(IoResult::Completed(connection)) => Some(connection),
        Ok(IoResult::WouldBlock(minor)) => {
            log::debug!("no connection yet: {minor}");
            None
        }
        Err(e) => {
            log::error!("failed to accept a connection: {e}");
            std::thread::sleep(ACCEPT_FAILURE_BACKOFF);
            None
        }
    }
}

fn echo(mut stream: TcpStream, configuration: &Configuration) -> srt_io::Result<()> {
    stream
        .set_nonblocking(true)
        .map_err(|e| srt_io::IoError::from_io_error(&e, "set_nonblocking"))?;
    let mut buffer = vec![0; 1316];
    loop {
        let length = match retry_while_blocked(configuration, || {
            read_result(stream.read(&mut buffer), "recv")
        })? {
            IoResult::WouldBlock(minor) => {
                log::trace!("idle connection: {minor}");
                continue;
            }
            IoResult::Completed(0) => {
                log::info!("connection was shut down as recv returned 0");
                return Ok(());
            }
            IoResult::Completed(length) => length,
        };

        let mut written = 0;
        while written < length {
            match retry_while_blocked(configuration, || {
                write_result(stream.write(&buffer[written..length]), "send")
            })? {
                IoResult::WouldBlock(minor) => {
                    log::debug!("send is backed up: {minor}");
                }
                IoResult::Completed(0) => {
                    log::info!("write stream was closed");
                    return Ok(());
                }
                IoResult::Completed(n) => written += n,
            }
        }
    }
}
