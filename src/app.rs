use crate::client;
use crate::commands::{self, Command};
use crate::config::Config;
use crate::image::ImageGenerator;
use crate::media::{ClipKind, FileSink, playback};
use crate::messages::{Attachment, AttachmentKind, Message, Role, Transcript};
use crate::prompts::{FIRST_MESSAGE, SYSTEM_INSTRUCTION};
use crate::script::{Scene, ScriptParser};
use crate::session::{ChatSession, SessionConfig};
use crate::speech::{self, OpenAiSpeech, SpeechSource};

use anyhow::Result;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy)]
enum MediaType {
    Image,
    Audio,
}

impl MediaType {
    fn label(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Audio => "audio",
        }
    }

    fn attachment(&self, location: PathBuf) -> Attachment {
        let (kind, clip) = match self {
            MediaType::Image => (AttachmentKind::Image, ClipKind::Png),
            MediaType::Audio => (AttachmentKind::Audio, ClipKind::Wav),
        };
        Attachment {
            kind,
            location,
            mime_type: clip.mime_type(),
        }
    }
}

pub struct App {
    config: Config,
    client: Client<OpenAIConfig>,
    session: ChatSession,
    transcript: Transcript,
    speech: Box<dyn SpeechSource>,
    images: ImageGenerator,
    sink: FileSink,
    script_parser: ScriptParser,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = client::create_client(&config.api_url, &config.api_key);
        let session = ChatSession::new(Self::session_config(&config))?;
        let speech = Box::new(OpenAiSpeech::new(
            client.clone(),
            config.speech_model.clone(),
            config.speech_sample_rate,
        ));
        let images = ImageGenerator::new(client.clone(), config.image_model.clone());
        let sink = FileSink::new(config.output_dir.clone());

        tracing::info!("Media will be written to {:?}", sink.dir());

        Ok(Self {
            config,
            client,
            session,
            transcript: Transcript::default(),
            speech,
            images,
            sink,
            script_parser: ScriptParser::new(),
        })
    }

    fn session_config(config: &Config) -> SessionConfig {
        SessionConfig {
            model: config.chat_model.clone(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        self.greet();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tracing::debug!("Main loop: waiting for input");
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::info!("Input closed, shutting down");
                        break;
                    };

                    match commands::parse(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => self.handle_command(command).await,
                        Ok(None) => {}
                        Err(e) => println!("{}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received Ctrl+C, shutting down");
                    break;
                }
            }
        }

        tracing::info!(
            "Session ended after {} messages",
            self.transcript.len()
        );
        Ok(())
    }

    fn greet(&mut self) {
        let greeting = self.transcript.push(Message::model(FIRST_MESSAGE));
        render(greeting);
        println!("(type /help for commands)");
    }

    async fn handle_command(&mut self, command: Command) {
        tracing::debug!("handle_command: {:?}", command);

        match command {
            Command::Chat(text) => self.handle_chat(text).await,
            Command::Image {
                prompt,
                aspect_ratio,
            } => {
                let aspect_ratio = aspect_ratio.unwrap_or_else(|| self.config.aspect_ratio.clone());
                self.handle_media(MediaType::Image, prompt, aspect_ratio).await
            }
            Command::Speak { text, voice } => {
                let voice = voice.unwrap_or_else(|| self.config.voice.clone());
                self.handle_media(MediaType::Audio, text, voice).await
            }
            Command::Scenes => self.list_scenes(),
            Command::Voiceover { scene } => {
                if let Some(scene) = self.find_scene(scene) {
                    let voice = self.config.voice.clone();
                    self.handle_media(MediaType::Audio, scene.audio, voice).await;
                }
            }
            Command::Render { scene, prompt } => {
                if let Some(scene) = self.find_scene(scene) {
                    match scene.image_prompts.get(prompt - 1) {
                        Some(text) => {
                            let aspect_ratio = self.config.aspect_ratio.clone();
                            self.handle_media(MediaType::Image, text.clone(), aspect_ratio)
                                .await
                        }
                        None => println!(
                            "Scene {} has {} image prompts",
                            scene.number,
                            scene.image_prompts.len()
                        ),
                    }
                }
            }
            Command::Reset => self.handle_reset(),
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => {}
        }
    }

    async fn handle_chat(&mut self, text: String) {
        self.transcript.push(Message::user(text.clone()));

        let reply = match self.session.send(&self.client, &text).await {
            Ok(reply) => Message::model(reply),
            Err(e) => {
                tracing::error!("Chat request failed: {:#}", e);
                Message::model(format!("Sorry, something went wrong. {}", e))
            }
        };

        render(self.transcript.push(reply));
    }

    /// Generate an image or voiceover and attach it to the transcript
    ///
    /// `option` is the aspect ratio for images and the voice for audio.
    async fn handle_media(&mut self, media: MediaType, prompt: String, option: String) {
        if prompt.trim().is_empty() {
            println!("Nothing to generate: the {} prompt is empty", media.label());
            return;
        }

        println!("Generating {}...", media.label());
        self.transcript.push(Message::user(format!(
            "Generate {}: {}",
            media.label(),
            prompt
        )));

        let result = match media {
            MediaType::Image => self.images.generate(&self.sink, &prompt, &option).await,
            MediaType::Audio => {
                speech::generate_speech(&*self.speech, &self.sink, &prompt, &option).await
            }
        };

        let message = match result {
            Ok(path) => {
                if self.config.autoplay && matches!(media, MediaType::Audio) {
                    playback::play_clip(path.clone()).await;
                }
                Message::model(format!("Here is your generated {}.", media.label()))
                    .with_attachment(media.attachment(path))
            }
            Err(e) => {
                tracing::error!("{} generation failed: {:#}", media.label(), e);
                Message::model(format!("Failed to generate {}. {}", media.label(), e))
            }
        };

        render(self.transcript.push(message));
    }

    fn handle_reset(&mut self) {
        if let Err(e) = self.session.reset() {
            tracing::error!("Failed to reset session: {:#}", e);
            return;
        }

        self.transcript.clear();
        tracing::info!("Started a new chat session");
        self.greet();
    }

    fn scenes(&self) -> Vec<Scene> {
        self.transcript
            .last_model_reply()
            .map(|reply| self.script_parser.parse(&reply.content))
            .unwrap_or_default()
    }

    fn find_scene(&self, number: u32) -> Option<Scene> {
        let scene = self.scenes().into_iter().find(|s| s.number == number);
        if scene.is_none() {
            println!("No scene {} in the last reply (try /scenes)", number);
        }
        scene
    }

    fn list_scenes(&self) {
        let scenes = self.scenes();
        if scenes.is_empty() {
            println!("The last reply has no [SCENE N] blocks");
            return;
        }

        for scene in scenes {
            println!("Scene {}: {}", scene.number, scene.visual);
            println!("  audio: {}", scene.audio);
            for (i, prompt) in scene.image_prompts.iter().enumerate() {
                println!("  prompt {}: {}", i + 1, prompt);
            }
        }
    }
}

fn render(message: &Message) {
    let speaker = match message.role {
        Role::User => "you",
        Role::Model => "assistant",
    };
    println!("\n[{}] {}", speaker, message.content);

    if let Some(attachment) = &message.attachment {
        println!(
            "  -> {} ({})",
            attachment.location.display(),
            attachment.mime_type
        );
    }
    println!();
}
