use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    frundles completions bash > ~/.bash_completion.d/frundles\n\n\
                  Generate zsh completions:\n    frundles completions zsh > ~/.zfunc/_frundles\n\n\
                  Generate fish completions:\n    frundles completions fish > ~/.config/fish/completions/frundles.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
