use anyhow::{Result, bail};

/// A single line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    Image {
        prompt: String,
        aspect_ratio: Option<String>,
    },
    Speak {
        text: String,
        voice: Option<String>,
    },
    Scenes,
    Voiceover {
        scene: u32,
    },
    Render {
        scene: u32,
        prompt: usize,
    },
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <text>                           chat with the assistant
  /image [--aspect R] <prompt>     generate an image (R: 16:9, 1:1, 9:16, 4:3, 3:4)
  /speak [--voice V] <text>        generate a voiceover
  /scenes                          list scenes in the last reply
  /voiceover <scene>               speak a scene's audio line
  /render <scene> [prompt]         generate a scene's image prompt (default 1)
  /reset                           start a new chat session
  /help                            show this help
  /quit                            exit";

/// Parse a line of input. Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Chat(line.to_string())));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "image" => {
            let (aspect_ratio, prompt) = take_flag(args, "--aspect")?;
            Command::Image {
                prompt: required(prompt, "/image needs a prompt")?,
                aspect_ratio,
            }
        }
        "speak" => {
            let (voice, text) = take_flag(args, "--voice")?;
            Command::Speak {
                text: required(text, "/speak needs some text")?,
                voice,
            }
        }
        "scenes" => Command::Scenes,
        "voiceover" => Command::Voiceover {
            scene: number(args, "/voiceover needs a scene number")?,
        },
        "render" => {
            let mut parts = args.split_whitespace();
            let scene = number(parts.next().unwrap_or(""), "/render needs a scene number")?;
            let prompt = match parts.next() {
                Some(p) => number(p, "prompt index must be a number")?,
                None => 1,
            };
            if prompt == 0 {
                bail!("prompt index starts at 1");
            }
            Command::Render { scene, prompt }
        }
        "reset" => Command::Reset,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command: /{} (try /help)", other),
    };

    Ok(Some(command))
}

/// Split a leading `--flag value` off `args`
fn take_flag<'a>(args: &'a str, flag: &str) -> Result<(Option<String>, &'a str)> {
    let Some(rest) = args.strip_prefix(flag) else {
        return Ok((None, args));
    };

    let rest = rest.trim_start();
    let (value, remainder) = match rest.split_once(char::is_whitespace) {
        Some((value, remainder)) => (value, remainder.trim()),
        None => (rest, ""),
    };

    if value.is_empty() {
        bail!("{} needs a value", flag);
    }

    Ok((Some(value.to_string()), remainder))
}

fn required(text: &str, message: &str) -> Result<String> {
    if text.is_empty() {
        bail!("{}", message);
    }
    Ok(text.to_string())
}

fn number<T: std::str::FromStr>(text: &str, message: &str) -> Result<T> {
    text.trim().parse().map_err(|_| anyhow::anyhow!("{}", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_and_blank() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(
            parse("  my niche is chess  ").unwrap(),
            Some(Command::Chat("my niche is chess".to_string()))
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            parse("/image a red fox").unwrap(),
            Some(Command::Image {
                prompt: "a red fox".to_string(),
                aspect_ratio: None,
            })
        );
        assert_eq!(
            parse("/image --aspect 9:16 a red fox").unwrap(),
            Some(Command::Image {
                prompt: "a red fox".to_string(),
                aspect_ratio: Some("9:16".to_string()),
            })
        );
        assert!(parse("/image").is_err());
        assert!(parse("/image --aspect 1:1").is_err());
    }

    #[test]
    fn test_speak() {
        assert_eq!(
            parse("/speak --voice onyx Welcome back").unwrap(),
            Some(Command::Speak {
                text: "Welcome back".to_string(),
                voice: Some("onyx".to_string()),
            })
        );
        assert!(parse("/speak --voice").is_err());
    }

    #[test]
    fn test_scene_commands() {
        assert_eq!(parse("/scenes").unwrap(), Some(Command::Scenes));
        assert_eq!(
            parse("/voiceover 3").unwrap(),
            Some(Command::Voiceover { scene: 3 })
        );
        assert_eq!(
            parse("/render 2").unwrap(),
            Some(Command::Render {
                scene: 2,
                prompt: 1
            })
        );
        assert_eq!(
            parse("/render 2 3").unwrap(),
            Some(Command::Render {
                scene: 2,
                prompt: 3
            })
        );
        assert!(parse("/render 2 0").is_err());
        assert!(parse("/voiceover two").is_err());
    }

    #[test]
    fn test_misc() {
        assert_eq!(parse("/RESET").unwrap(), Some(Command::Reset));
        assert_eq!(parse("/exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("/help").unwrap(), Some(Command::Help));
        assert!(parse("/video a cat").is_err());
    }
}
