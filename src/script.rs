use regex::Regex;

/// One `[SCENE N]` block of a generated script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub number: u32,
    pub visual: String,
    /// Voiceover text, ready to hand to speech generation
    pub audio: String,
    pub image_prompts: Vec<String>,
}

/// Extracts scenes from model replies written in the script format
///
/// Replies are markdown, so headers may come wrapped in `#`, `**` or stray
/// whitespace. Scenes missing a field keep it empty rather than being dropped.
pub struct ScriptParser {
    scene_header: Regex,
    visual: Regex,
    audio: Regex,
    prompts_header: Regex,
    numbered_item: Regex,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self {
            scene_header: Regex::new(r"(?mi)^[\s#*]*\[SCENE\s+(\d+)\][*\s]*$").unwrap(),
            visual: Regex::new(r"(?mi)^[\s*-]*\*\*Visual:\*\*\s*(.+)$").unwrap(),
            audio: Regex::new(r"(?mi)^[\s*-]*\*\*Audio:\*\*\s*(.+)$").unwrap(),
            prompts_header: Regex::new(r"(?mi)^[\s*-]*\*\*Image Prompts:\*\*").unwrap(),
            numbered_item: Regex::new(r"^\s*\d+[.)]\s+(.+)$").unwrap(),
        }
    }

    pub fn parse(&self, reply: &str) -> Vec<Scene> {
        let headers: Vec<(usize, usize, u32)> = self
            .scene_header
            .captures_iter(reply)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let number = caps[1].parse().ok()?;
                Some((whole.start(), whole.end(), number))
            })
            .collect();

        headers
            .iter()
            .enumerate()
            .map(|(i, &(_, body_start, number))| {
                let body_end = headers
                    .get(i + 1)
                    .map(|&(next_start, _, _)| next_start)
                    .unwrap_or(reply.len());
                self.parse_scene(number, &reply[body_start..body_end])
            })
            .collect()
    }

    fn parse_scene(&self, number: u32, body: &str) -> Scene {
        let field = |re: &Regex| {
            re.captures(body)
                .map(|caps| clean(&caps[1]))
                .unwrap_or_default()
        };

        let image_prompts = match self.prompts_header.find(body) {
            Some(m) => body[m.end()..]
                .lines()
                .skip_while(|line| line.trim().is_empty() || !self.numbered_item.is_match(line))
                .take_while(|line| self.numbered_item.is_match(line))
                .filter_map(|line| self.numbered_item.captures(line))
                .map(|caps| clean(&caps[1]))
                .collect(),
            None => Vec::new(),
        };

        Scene {
            number,
            visual: field(&self.visual),
            audio: field(&self.audio),
            image_prompts,
        }
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

fn clean(text: &str) -> String {
    text.trim()
        .trim_matches(|c: char| c == '"' || c == '“' || c == '”')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "## Script 1: Budget Meal Prep\n\
\n\
[SCENE 1]\n\
**Visual:** A cluttered kitchen counter at dawn\n\
**Audio:** \"Most people waste forty dollars a week on food.\"\n\
**Image Prompts:**\n\
1. Photorealistic messy kitchen counter, golden hour light\n\
2. 3D render of a kitchen counter with floating price tags\n\
3. Cinematic illustration of a sunrise over a kitchen\n\
\n\
**[SCENE 2]**\n\
**Visual:** Neatly stacked containers\n\
**Audio:** Here is how to fix that in one hour.\n\
**Image Prompts:**\n\
1. Overhead photo of glass meal prep containers\n\
2. Isometric 3D render of stacked containers\n\
\n\
That wraps up the script.\n";

    #[test]
    fn test_parses_scenes() {
        let scenes = ScriptParser::new().parse(SCRIPT);
        assert_eq!(scenes.len(), 2);

        assert_eq!(scenes[0].number, 1);
        assert_eq!(scenes[0].visual, "A cluttered kitchen counter at dawn");
        assert_eq!(
            scenes[0].audio,
            "Most people waste forty dollars a week on food."
        );
        assert_eq!(scenes[0].image_prompts.len(), 3);
        assert_eq!(
            scenes[0].image_prompts[2],
            "Cinematic illustration of a sunrise over a kitchen"
        );

        assert_eq!(scenes[1].number, 2);
        assert_eq!(scenes[1].audio, "Here is how to fix that in one hour.");
        assert_eq!(scenes[1].image_prompts.len(), 2);
    }

    #[test]
    fn test_no_scenes() {
        let parser = ScriptParser::new();
        assert!(parser.parse("Tell me your YouTube channel niche").is_empty());
        assert!(parser.parse("").is_empty());
    }

    #[test]
    fn test_missing_fields_stay_empty() {
        let scenes = ScriptParser::new().parse("[SCENE 7]\n**Audio:** Just narration\n");
        assert_eq!(
            scenes,
            vec![Scene {
                number: 7,
                visual: String::new(),
                audio: "Just narration".to_string(),
                image_prompts: Vec::new(),
            }]
        );
    }
}
