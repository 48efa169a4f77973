//! Real subprocesses via `std::process::Command`.

use std::io::{self, ErrorKind, Read, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use super::{Capture, CommandRunner, Invocation, RunOutcome};

/// Spawns real processes.
///
/// In [`Capture::Combined`] mode stdout and stderr share one pipe, so the
/// buffer keeps the order in which the child wrote to either stream. In
/// [`Capture::Passthrough`] mode each stream is drained by its own thread and
/// the chunks are written to the caller's writers on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl CommandRunner for ProcessRunner {
    fn run(
        &mut self,
        invocation: &Invocation,
        capture: Capture,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<RunOutcome> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::inherit());

        match capture {
            Capture::Passthrough => {
                command.stdout(Stdio::piped()).stderr(Stdio::piped());
                let mut child = command.spawn()?;

                let (tx, rx) = mpsc::channel();
                let pumps = [
                    child.stdout.take().map(|s| pump(Stream::Out, s, tx.clone())),
                    child.stderr.take().map(|s| pump(Stream::Err, s, tx.clone())),
                ];
                drop(tx);

                // Keep draining after a write failure so the child never
                // blocks on a full pipe.
                let mut forwarded = Ok(());
                for (stream, chunk) in rx {
                    if forwarded.is_ok() {
                        let target: &mut dyn Write = match stream {
                            Stream::Out => &mut *out,
                            Stream::Err => &mut *err,
                        };
                        forwarded = target.write_all(&chunk).and_then(|()| target.flush());
                    }
                }
                for handle in pumps.into_iter().flatten() {
                    let _ = handle.join();
                }

                let status = child.wait()?;
                forwarded?;
                Ok(RunOutcome {
                    code: status.code(),
                    output: Vec::new(),
                })
            }
            Capture::Combined => {
                let (mut reader, writer) = io::pipe()?;
                command.stdout(writer.try_clone()?).stderr(writer);

                let mut child = command.spawn()?;
                // The command still holds the write ends; close them so the
                // read below sees EOF once the child exits.
                drop(command);

                let mut output = Vec::new();
                let read = reader.read_to_end(&mut output);
                let status = child.wait()?;
                read?;

                Ok(RunOutcome {
                    code: status.code(),
                    output,
                })
            }
        }
    }
}

fn pump<R>(stream: Stream, mut source: R, tx: Sender<(Stream, Vec<u8>)>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match source.read(&mut buf) {
                Ok(0) => return,
                Ok(n) => {
                    if tx.send((stream, buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(_) => return,
            }
        }
    })
}
