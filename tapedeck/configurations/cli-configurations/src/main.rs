pub(crate) mod utils;

use ::domain::MediaRegistry;
use ::infrastructures::boundaries::ExportLibraryView;
use ::infrastructures::boundaries::FindVideoView;
use ::infrastructures::boundaries::ImportLibraryView;
use ::infrastructures::boundaries::ShowLibraryView;
use ::infrastructures::gateways::allocators::SequentialIdAllocator;
use ::infrastructures::gateways::repositories::JsonDocumentRepository;
use ::infrastructures::workers::RegistryWorker;
use ::use_cases::boundaries::Accept;
use ::use_cases::boundaries::ExportLibraryOutputBoundary;
use ::use_cases::boundaries::ExportLibraryRequestModel;
use ::use_cases::boundaries::FindVideoOutputBoundary;
use ::use_cases::boundaries::FindVideoRequestModel;
use ::use_cases::boundaries::ImportLibraryOutputBoundary;
use ::use_cases::boundaries::ImportLibraryRequestModel;
use ::use_cases::boundaries::ShowLibraryOutputBoundary;
use ::use_cases::boundaries::ShowLibraryRequestModel;
use ::use_cases::gateways::DocumentRepository;
use ::use_cases::gateways::IdAllocator;
use ::use_cases::gateways::LibraryStore;
use ::use_cases::interactors::ExportLibraryInteractor;
use ::use_cases::interactors::FindVideoInteractor;
use ::use_cases::interactors::ImportLibraryInteractor;
use ::use_cases::interactors::ShowLibraryInteractor;
use ::use_cases::models::documents::ExportFilter;
use ::use_cases::models::documents::ExportMode;
use ::use_cases::models::settings::LibrarySettings;
use ::use_cases::models::settings::MatchPolicy;
use ::use_cases::models::settings::MatchSettings;

use crate::utils::aliases::Fallible;
use crate::utils::extensions::OptionExt;

#[tokio::main]
async fn main() -> Fallible<()> {
    let writer = ::tracing_appender::rolling::daily("logs", "tapedeck.log");
    let (writer, _guard) = ::tracing_appender::non_blocking(writer);

    ::tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            ::tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| ::tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    let matches = command().get_matches();
    let (subcommand, submatches) = matches.subcommand().ok()?;

    let matching = match subcommand {
        "find" => MatchSettings::new(
            submatches.get_one::<::std::string::String>("policy").ok()?.parse::<MatchPolicy>()?,
            usize::try_from(*submatches.get_one::<u64>("first-chars").ok()?)?,
            usize::try_from(*submatches.get_one::<u64>("ignore-last").ok()?)?,
        ),
        _ => MatchSettings::default(),
    };

    let settings = ::std::sync::Arc::new(LibrarySettings::new(
        ::std::path::absolute(submatches.get_one::<::std::path::PathBuf>("downloads").ok()?)?,
        matching,
        *submatches.get_one::<usize>("max-depth").ok()?,
    ));

    ::tracing::info!(subcommand, downloads_dir = %settings.downloads_dir.display(), "starting");

    let registry = MediaRegistry::new();
    let ids = ::std::sync::Arc::new(SequentialIdAllocator::following(&registry)) as ::std::sync::Arc<dyn IdAllocator>;
    let (worker, _) = RegistryWorker::spawn(registry);
    let store = worker as ::std::sync::Arc<dyn LibraryStore>;
    let documents = ::std::sync::Arc::new(JsonDocumentRepository::new(true)) as ::std::sync::Arc<dyn DocumentRepository>;

    let import_library_interactor = ::std::sync::Arc::new(ImportLibraryInteractor::new(
        ::std::sync::Arc::new(ImportLibraryView) as ::std::sync::Arc<dyn ImportLibraryOutputBoundary>,
        ::std::sync::Arc::clone(&documents),
        ::std::sync::Arc::clone(&store),
        ids,
        ::std::sync::Arc::clone(&settings),
    ));

    import_library_interactor
        .accept(ImportLibraryRequestModel {
            path: submatches.get_one::<::std::path::PathBuf>("input").ok()?.to_owned(),
            parent: None,
        })
        .await?;

    match subcommand {
        "show" => {
            let show_library_interactor = ::std::sync::Arc::new(ShowLibraryInteractor::new(
                ::std::sync::Arc::new(ShowLibraryView) as ::std::sync::Arc<dyn ShowLibraryOutputBoundary>,
                store,
                settings,
            ));

            show_library_interactor
                .accept(ShowLibraryRequestModel {
                    include_hidden: submatches.get_flag("all"),
                })
                .await?;
        },

        "export" => {
            let export_library_interactor = ::std::sync::Arc::new(ExportLibraryInteractor::new(
                ::std::sync::Arc::new(ExportLibraryView) as ::std::sync::Arc<dyn ExportLibraryOutputBoundary>,
                documents,
                store,
            ));

            let request = ExportLibraryRequestModel {
                path: submatches.get_one::<::std::path::PathBuf>("output").ok()?.to_owned(),
                mode: match submatches.get_flag("flat") {
                    true => ExportMode::Flat,
                    false => ExportMode::Nested,
                },
                filter: ExportFilter {
                    videos: !submatches.get_flag("no-videos"),
                    channels: !submatches.get_flag("no-channels"),
                    playlists: !submatches.get_flag("no-playlists"),
                },
            };

            export_library_interactor.accept(request).await?;
        },

        "find" => {
            let find_video_interactor = ::std::sync::Arc::new(FindVideoInteractor::new(
                ::std::sync::Arc::new(FindVideoView) as ::std::sync::Arc<dyn FindVideoOutputBoundary>,
                store,
                settings,
            ));

            find_video_interactor
                .accept(FindVideoRequestModel {
                    name: submatches.get_one::<::std::string::String>("name").ok()?.to_owned(),
                })
                .await?;
        },

        _ => unreachable!(),
    }

    Ok(())
}

fn command() -> ::clap::Command {
    let input = || {
        ::clap::Arg::new("input")
            .short('i')
            .required(true)
            .value_parser(::clap::value_parser!(::std::path::PathBuf))
    };

    ::clap::Command::new("tapedeck")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            ::clap::Command::new("show").arg(input()).arg(
                ::clap::Arg::new("all")
                    .long("all")
                    .action(::clap::ArgAction::SetTrue)
                    .help("Include hidden folders"),
            ),
        )
        .subcommand(
            ::clap::Command::new("export")
                .arg(input())
                .arg(
                    ::clap::Arg::new("output")
                        .short('o')
                        .required(true)
                        .value_parser(::clap::value_parser!(::std::path::PathBuf)),
                )
                .arg(::clap::Arg::new("flat").long("flat").action(::clap::ArgAction::SetTrue))
                .arg(::clap::Arg::new("no-videos").long("no-videos").action(::clap::ArgAction::SetTrue))
                .arg(::clap::Arg::new("no-channels").long("no-channels").action(::clap::ArgAction::SetTrue))
                .arg(::clap::Arg::new("no-playlists").long("no-playlists").action(::clap::ArgAction::SetTrue)),
        )
        .subcommand(
            ::clap::Command::new("find")
                .arg(input())
                .arg(
                    ::clap::Arg::new("name")
                        .long("name")
                        .required(true)
                        .value_parser(::clap::value_parser!(::std::string::String)),
                )
                .arg(
                    ::clap::Arg::new("policy")
                        .long("policy")
                        .default_value("exact-match")
                        .value_parser(["exact-match", "match-first", "ignore-last"]),
                )
                .arg(
                    ::clap::Arg::new("first-chars")
                        .long("first-chars")
                        .default_value("1")
                        .value_parser(::clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    ::clap::Arg::new("ignore-last")
                        .long("ignore-last")
                        .default_value("1")
                        .value_parser(::clap::value_parser!(u64).range(1..)),
                ),
        )
        .arg(
            ::clap::Arg::new("downloads")
                .short('d')
                .global(true)
                .default_value("downloads")
                .value_parser(::clap::value_parser!(::std::path::PathBuf)),
        )
        .arg(
            ::clap::Arg::new("max-depth")
                .long("max-depth")
                .global(true)
                .default_value("8")
                .value_parser(::clap::value_parser!(usize)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_widths_must_be_positive() {
        for flag in ["--first-chars", "--ignore-last"] {
            assert!(command().try_get_matches_from(["tapedeck", "find", "-i", "in.json", "--name", "x", flag, "0"]).is_err());
            assert!(command().try_get_matches_from(["tapedeck", "find", "-i", "in.json", "--name", "x", flag, "2"]).is_ok());
        }
    }

    #[test]
    fn match_widths_default_to_one() {
        let matches = command().try_get_matches_from(["tapedeck", "find", "-i", "in.json", "--name", "x"]).unwrap();
        let (_, submatches) = matches.subcommand().unwrap();

        assert_eq!(submatches.get_one::<u64>("first-chars"), Some(&1));
        assert_eq!(submatches.get_one::<u64>("ignore-last"), Some(&1));
    }
}
