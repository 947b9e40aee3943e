use std::str::FromStr;

use crate::archive::ArchiveSource;

/// One line of console input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCmd {
    Sources,
    List(ArchiveSource),
    Load(ArchiveSource, String),
    Install(String),
    Demo,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    Seek(f64),
    Volume(f32),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  sources                      show archive roots
  list <bundled|local>         list cartridges
  load <bundled|local> <id>    load a cartridge into the queue
  install <id>                 copy a bundled cartridge into the local archive
  demo                         load a demo queue
  play | pause | toggle | stop
  next | prev
  seek <seconds>
  volume <0..1>
  status | help | quit";

impl FromStr for ControlCmd {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        let cmd = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("sources", []) => ControlCmd::Sources,
            ("list" | "ls", [source]) => ControlCmd::List(source.parse()?),
            ("load", [source, id]) => ControlCmd::Load(source.parse()?, (*id).to_string()),
            ("install", [id]) => ControlCmd::Install((*id).to_string()),
            ("demo", []) => ControlCmd::Demo,
            ("play" | "p", []) => ControlCmd::Play,
            ("pause", []) => ControlCmd::Pause,
            ("toggle" | "t", []) => ControlCmd::PlayPause,
            ("stop" | "s", []) => ControlCmd::Stop,
            ("next" | "n", []) => ControlCmd::Next,
            ("prev" | "previous", []) => ControlCmd::Prev,
            ("seek", [secs]) => ControlCmd::Seek(
                secs.parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite())
                    .ok_or_else(|| format!("not a number of seconds: {secs}"))?,
            ),
            ("volume" | "vol", [level]) => ControlCmd::Volume(
                level
                    .parse()
                    .map_err(|_| format!("not a volume level: {level}"))?,
            ),
            ("status", []) => ControlCmd::Status,
            ("help" | "?", []) => ControlCmd::Help,
            ("quit" | "q" | "exit", []) => ControlCmd::Quit,
            (other, _) => return Err(format!("unknown command or arguments: {other}")),
        };
        Ok(cmd)
    }
}
