//! Tool surface exposed to an assistant host
//!
//! Every tool takes a JSON object of arguments and produces a [`ToolOutput`].
//! Classified query failures become error outputs; only unknown tool names and
//! serialization failures are returned as [`IntelError`](crate::error::IntelError).

pub mod args;
pub mod catalog;
pub mod output;

pub use catalog::{definitions, Tool, ToolDefinition};
pub use output::{decode_data_url, ToolContent, ToolOutput};

use crate::error::{QueryResult, Result};
use crate::pagination::{Cursor, NumberedPage};
use crate::query::{ImageQuery, IocQuery, IocV2Query, ThreatActorQuery, VictimKey};
use crate::service::{ThreatActorProfile, ThreatIntelService};
use crate::traits::QueryExecutor;
use crate::types::{Envelope, ImageEnvelope, MessageEnvelope};
use args::{
    ActorFeedsArgs, CategoryArgs, ConfidenceArgs, CountryArgs, ImageArgs, IocPageArgs,
    IocTypeArgs, KeywordCursorArgs, KeywordWindowArgs, NameArgs, NextActorPageArgs,
    NextFeedPageArgs, ProfileArgs, ThreatTypeArgs, UuidArgs, UuidCursorArgs, VictimArgs,
};
use serde_json::Value;
use tracing::debug;

/// Successful outcome of a tool, before it is rendered
enum Reply {
    Listing(Envelope),
    Messaged(MessageEnvelope),
    Page(NumberedPage),
    Profile(ThreatActorProfile),
    Image(ImageEnvelope),
    Text(String),
}

impl From<Envelope> for Reply {
    fn from(envelope: Envelope) -> Self {
        Reply::Listing(envelope)
    }
}

impl From<MessageEnvelope> for Reply {
    fn from(envelope: MessageEnvelope) -> Self {
        Reply::Messaged(envelope)
    }
}

impl From<NumberedPage> for Reply {
    fn from(page: NumberedPage) -> Self {
        Reply::Page(page)
    }
}

/// Dispatches tool calls to a [`ThreatIntelService`]
pub struct ToolRegistry<E> {
    service: ThreatIntelService<E>,
}

impl<E: QueryExecutor> ToolRegistry<E> {
    pub fn new(service: ThreatIntelService<E>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ThreatIntelService<E> {
        &self.service
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    /// Run the named tool with JSON `arguments` (`null` is treated as `{}`)
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolOutput> {
        let tool: Tool = name.parse()?;
        debug!(tool = name, "calling tool");

        match self.run(tool, arguments).await {
            Ok(Reply::Listing(envelope)) => ToolOutput::json(&envelope),
            Ok(Reply::Messaged(envelope)) => ToolOutput::json(&envelope),
            Ok(Reply::Page(page)) => ToolOutput::json(&page),
            Ok(Reply::Profile(profile)) => ToolOutput::json(&profile),
            Ok(Reply::Image(envelope)) => Ok(ToolOutput::image(&envelope)),
            Ok(Reply::Text(text)) => Ok(ToolOutput::text(text)),
            Err(record) => {
                debug!(tool = name, code = %record.code, "tool returned an error output");
                Ok(ToolOutput::error(&record))
            }
        }
    }

    async fn run(&self, tool: Tool, arguments: Value) -> QueryResult<Reply> {
        let name = tool.name();
        let service = &self.service;

        let reply: Reply = match tool {
            Tool::SearchCves => service.search_cves(args::parse(name, arguments)?).await?.into(),

            Tool::GetThreatFeedById => {
                let args: UuidArgs = args::parse(name, arguments)?;
                service.get_threat_feed_by_id(&args.uuid).await?.into()
            }
            Tool::GetThreatFeedsByActor => {
                let args: ActorFeedsArgs = args::parse(name, arguments)?;
                let cursor = Cursor::from_optional(args.next)?;
                service
                    .get_threat_feeds_by_actor(&args.threat_actor_uuid, cursor)
                    .await?
                    .into()
            }
            Tool::GetThreatFeedsByCategory => {
                let args: CategoryArgs = args::parse(name, arguments)?;
                let window = args.window();
                service
                    .get_threat_feeds_by_category(
                        args.category,
                        window,
                        args.victim_key,
                        args.victim_value,
                    )
                    .await?
                    .into()
            }
            Tool::SearchThreatFeedsByKeyword => {
                let args: KeywordWindowArgs = args::parse(name, arguments)?;
                service
                    .search_threat_feeds_by_keyword(&args.keyword, args.window())
                    .await?
                    .into()
            }
            Tool::GetThreatFeedsByOrganization
            | Tool::GetThreatFeedsByDomain
            | Tool::GetThreatFeedsByCountry
            | Tool::GetThreatFeedsByIndustry => {
                let key = match tool {
                    Tool::GetThreatFeedsByOrganization => VictimKey::Organization,
                    Tool::GetThreatFeedsByDomain => VictimKey::Site,
                    Tool::GetThreatFeedsByCountry => VictimKey::Country,
                    _ => VictimKey::Industry,
                };
                let args: VictimArgs = args::parse(name, arguments)?;
                service
                    .get_threat_feeds_by_victim(key, &args.value, args.window(), args.category)
                    .await?
                    .into()
            }
            Tool::GetNextThreatFeedPage => {
                let args: NextFeedPageArgs = args::parse(name, arguments)?;
                let cursor = Cursor::parse(args.next_token)?;
                service.next_threat_feed_page(args.filters, cursor).await?.into()
            }
            Tool::GetThreatImage => {
                let args: ImageArgs = args::parse(name, arguments)?;
                Reply::Image(service.get_threat_image(ImageQuery::new(args.image_uuid)).await?)
            }

            Tool::GetThreatActorProfile => {
                let args: ProfileArgs = args::parse(name, arguments)?;
                match service
                    .threat_actor_profile(&args.actor_name, args.include_feeds)
                    .await?
                {
                    Some(profile) => Reply::Profile(profile),
                    None => Reply::Text(format!(
                        "No threat actor found with name: \"{}\". Please check the spelling or try a different name.",
                        args.actor_name
                    )),
                }
            }
            Tool::SearchThreatActors => service
                .search_threat_actors(args::parse(name, arguments)?)
                .await?
                .into(),
            Tool::GetThreatActorById => {
                let args: UuidArgs = args::parse(name, arguments)?;
                service.get_threat_actor_by_id(&args.uuid).await?.into()
            }
            Tool::SearchThreatActorsByName => {
                let args: NameArgs = args::parse(name, arguments)?;
                service.search_threat_actors_by_name(&args.name).await?.into()
            }
            Tool::GetNextThreatActorPage => {
                let args: NextActorPageArgs = args::parse(name, arguments)?;
                let cursor = Cursor::parse(args.next_token)?;
                let filters = ThreatActorQuery {
                    name: args.name,
                    ..ThreatActorQuery::default()
                };
                service.next_threat_actor_page(filters, cursor).await?.into()
            }

            Tool::SearchIocs => service.search_iocs(args::parse(name, arguments)?).await?.into(),
            Tool::GetIocsByCountry => {
                let args: CountryArgs = args::parse(name, arguments)?;
                service.get_iocs_by_country(&args.country).await?.into()
            }
            Tool::GetIocsByThreatType => {
                let args: ThreatTypeArgs = args::parse(name, arguments)?;
                service.get_iocs_by_threat_type(args.threat_type).await?.into()
            }
            Tool::GetIocsPage | Tool::GetNextIocPage => {
                let args: IocPageArgs = args::parse(name, arguments)?;
                let page = args.page_number()?;
                let filters = IocQuery {
                    country: args.country,
                    page: None,
                    threat_type: args.threat_type,
                };
                service.get_iocs_page(filters, page).await?.into()
            }
            Tool::GetIocsByType => {
                let args: IocTypeArgs = args::parse(name, arguments)?;
                self.iocs_v2(IocV2Query {
                    ioc_type: Some(args.ioc_type),
                    next: args.next,
                    ..IocV2Query::default()
                })
                .await?
            }
            Tool::GetIocsByMalwareUuid => {
                let args: UuidCursorArgs = args::parse(name, arguments)?;
                self.iocs_v2(IocV2Query {
                    malware_uuid: Some(args.uuid),
                    next: args.next,
                    ..IocV2Query::default()
                })
                .await?
            }
            Tool::GetIocsByThreatActorUuid => {
                let args: UuidCursorArgs = args::parse(name, arguments)?;
                self.iocs_v2(IocV2Query {
                    threat_actor_uuid: Some(args.uuid),
                    next: args.next,
                    ..IocV2Query::default()
                })
                .await?
            }
            Tool::GetIocsByConfidence => {
                let args: ConfidenceArgs = args::parse(name, arguments)?;
                self.iocs_v2(IocV2Query {
                    confidence: Some(args.confidence),
                    next: args.next,
                    ..IocV2Query::default()
                })
                .await?
            }
            Tool::GetIocsByKeyword => {
                let args: KeywordCursorArgs = args::parse(name, arguments)?;
                self.iocs_v2(IocV2Query {
                    keyword: Some(args.keyword),
                    next: args.next,
                    ..IocV2Query::default()
                })
                .await?
            }
            Tool::GetIocThreatActors => service
                .get_ioc_threat_actors(args::parse(name, arguments)?)
                .await?
                .into(),
            Tool::GetIocMalwares => service
                .get_ioc_malwares(args::parse(name, arguments)?)
                .await?
                .into(),
        };

        Ok(reply)
    }

    async fn iocs_v2(&self, query: IocV2Query) -> QueryResult<Reply> {
        Ok(self.service.search_iocs_v2(query).await?.into())
    }
}
