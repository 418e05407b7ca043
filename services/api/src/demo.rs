use crate::infra::{InMemoryMarketplace, InMemoryNotifier};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use extrataff::error::AppError;
use extrataff::staffing::hiring::StaffingService;
use extrataff::staffing::matching::{MatchWeights, MatchingEngine, RankedMission};
use extrataff::staffing::mission::{
    ContractType, Mission, MissionId, MissionStatus, Position, UrgencyLevel,
};
use extrataff::staffing::planning::MissionPlanImporter;
use extrataff::staffing::talent::{Talent, TalentId};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_ESTABLISHMENT: &str = "etab-demo";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Marketplace date for the demo (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Optional mission plan CSV to hydrate the marketplace.
    #[arg(long)]
    pub(crate) missions_csv: Option<PathBuf>,
    /// Skip the hiring portion of the demo.
    #[arg(long)]
    pub(crate) skip_hiring: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PlanPreviewArgs {
    /// Mission plan CSV export to import
    #[arg(long)]
    pub(crate) missions_csv: PathBuf,
    /// Establishment the imported missions would belong to
    #[arg(long, default_value = "etab-demo")]
    pub(crate) establishment_id: String,
}

pub(crate) fn run_plan_preview(args: PlanPreviewArgs) -> Result<(), AppError> {
    let PlanPreviewArgs {
        missions_csv,
        establishment_id,
    } = args;

    let import = MissionPlanImporter::from_path(missions_csv, &establishment_id)?;
    println!("Mission plan preview for {establishment_id}");
    println!(
        "{} missions imported, {} rows skipped",
        import.missions.len(),
        import.skipped
    );
    for mission in &import.missions {
        let rate = match mission.hourly_rate {
            Some(rate) => format!("{rate:.2} EUR/h"),
            None => "rate not listed".to_string(),
        };
        let end = match mission.end_date {
            Some(date) => format!(" -> {date}"),
            None => String::new(),
        };
        println!(
            "- {} | {} | {} | {}{} | {} seat(s) | {} | {}",
            mission.id.0,
            mission.position.label(),
            mission.contract_type.label(),
            mission.start_date,
            end,
            mission.nb_postes,
            rate,
            mission.location_fuzzy
        );
    }

    let talent = demo_talent();
    let feed = MatchingEngine::default().matched_missions(&talent, &import.missions);
    println!("\nFeed preview for the reference profile ({})", talent.full_name());
    render_feed(&feed);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        missions_csv,
        skip_hiring,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let morning = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
    let now = Utc.from_utc_datetime(&today.and_time(morning));

    println!("ExtraTaff staffing demo");
    println!("Marketplace date: {today}");

    let repository = Arc::new(InMemoryMarketplace::default());
    let notifier = Arc::new(InMemoryNotifier::default());
    let service = StaffingService::new(
        repository.clone(),
        notifier.clone(),
        MatchWeights::default(),
    );

    let missions = match missions_csv {
        Some(path) => {
            let import = MissionPlanImporter::from_path(path, DEMO_ESTABLISHMENT)?;
            println!(
                "Hydrated {} missions from the plan export ({} rows skipped)",
                import.missions.len(),
                import.skipped
            );
            import.missions
        }
        None => demo_missions(today),
    };
    for mission in missions {
        repository.seed_mission(mission);
    }

    let talent = demo_talent();
    let talent_id = talent.id.clone();
    println!("Talent profile: {}", talent.full_name());
    repository.seed_talent(talent);

    let feed = service.feed(&talent_id)?;
    println!("\nMission feed (best match first, exact address stays fuzzy until hire)");
    render_feed(&feed);

    if skip_hiring {
        return Ok(());
    }

    let mission_id = match feed.first() {
        Some(entry) => entry.mission.id.clone(),
        None => {
            println!("\nNo mission clears the cutoff, nothing to hire on");
            return Ok(());
        }
    };

    println!("\nHiring walkthrough on {}", mission_id.0);
    let application = service.apply(&mission_id, &talent_id, now)?;
    println!(
        "- Application {} received -> status {} (match score {} locked in)",
        application.id.0,
        application.status.label(),
        application.match_score
    );

    match service.apply(&mission_id, &talent_id, now) {
        Ok(_) => println!("- Duplicate application unexpectedly accepted"),
        Err(err) => println!("- Second application refused: {err}"),
    }

    let application = service.accept(&application.id, now)?;
    println!(
        "- Establishment accepts -> status {}",
        application.status.label()
    );

    match service.confirm_hire(&application.id, now) {
        Ok(_) => println!("- Hire sealed without the talent's confirmation"),
        Err(err) => println!("- Hire cannot be sealed yet: {err}"),
    }

    let application = service.talent_confirm(&application.id, now)?;
    println!(
        "- Talent confirms availability -> still {}",
        application.status.label()
    );

    let application = service.confirm_hire(&application.id, now)?;
    println!("- Hire confirmed -> status {}", application.status.label());

    println!("\nStaffing board for {DEMO_ESTABLISHMENT}");
    for entry in service.board(DEMO_ESTABLISHMENT)? {
        println!(
            "- {} | {} | {} | seats {}/{} | {} candidate(s) | {} hired",
            entry.mission_id,
            entry.position,
            entry.status,
            entry.nb_postes_pourvus,
            entry.nb_postes,
            entry.candidate_count,
            entry.hired_count
        );
    }

    if let Some(past) = feed.get(1) {
        println!("\nRating leg on {}", past.mission.id.0);
        let application = service.apply(&past.mission.id, &talent_id, now)?;
        service.accept(&application.id, now)?;
        service.talent_confirm(&application.id, now)?;
        let application = service.confirm_hire(&application.id, now)?;

        match service.rate_talent(
            &application.id,
            5,
            Some("Service impeccable, très bon contact client.".to_string()),
            now,
        ) {
            Ok(rating) => {
                println!(
                    "- {} rates {} -> {} stars",
                    rating.rater_id, rating.rated_id, rating.overall_score
                );
                match service.rate_talent(&application.id, 3, None, now) {
                    Ok(_) => println!("- Second rating unexpectedly accepted"),
                    Err(err) => println!("- Second rating refused: {err}"),
                }
            }
            Err(err) => println!("- Rating not open: {err}"),
        }
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("\nNotifications: none dispatched");
    } else {
        println!("\nNotifications dispatched");
        for notice in events {
            println!(
                "- template={} -> {}",
                notice.template, notice.application_id.0
            );
        }
    }

    Ok(())
}

fn render_feed(feed: &[RankedMission]) {
    if feed.is_empty() {
        println!("- nothing clears the match cutoff");
        return;
    }
    for entry in feed {
        println!(
            "- {} | {} | {} | starts {} | score {} ({}) | {}",
            entry.mission.id.0,
            entry.mission.position.label(),
            entry.mission.contract_type.label(),
            entry.mission.start_date,
            entry.match_score,
            entry.match_category.label(),
            entry.mission.urgency_badge().label()
        );
    }
}

/// Seed data behind `serve --seed-demo` and the CLI demo.
pub(crate) fn seed_marketplace(repository: &InMemoryMarketplace) {
    for mission in demo_missions(Local::now().date_naive()) {
        repository.seed_mission(mission);
    }
    repository.seed_talent(demo_talent());
}

fn demo_missions(today: NaiveDate) -> Vec<Mission> {
    vec![
        // Upcoming dinner rush, two seats, flagged urgent.
        Mission {
            id: MissionId("mission-demo-001".to_string()),
            establishment_id: DEMO_ESTABLISHMENT.to_string(),
            position: Position::Serveur,
            contract_type: ContractType::Extra,
            hourly_rate: Some(14.5),
            salary_text: None,
            start_date: today + chrono::Duration::days(3),
            end_date: Some(today + chrono::Duration::days(5)),
            shift_start_time: NaiveTime::from_hms_opt(18, 0, 0),
            shift_end_time: NaiveTime::from_hms_opt(23, 30, 0),
            urgency_level: Some(UrgencyLevel::Urgent),
            nb_postes: 2,
            nb_postes_pourvus: 0,
            status: MissionStatus::Open,
            location_fuzzy: "Paris 11e".to_string(),
        },
        // Already over; exists so the rating leg has something to rate.
        Mission {
            id: MissionId("mission-demo-002".to_string()),
            establishment_id: DEMO_ESTABLISHMENT.to_string(),
            position: Position::Serveur,
            contract_type: ContractType::Extra,
            hourly_rate: Some(16.0),
            salary_text: None,
            start_date: today - chrono::Duration::days(10),
            end_date: Some(today - chrono::Duration::days(3)),
            shift_start_time: None,
            shift_end_time: None,
            urgency_level: None,
            nb_postes: 1,
            nb_postes_pourvus: 0,
            status: MissionStatus::Open,
            location_fuzzy: "Paris 9e".to_string(),
        },
        // Wrong trade and contract for the demo talent; stays off the feed.
        Mission {
            id: MissionId("mission-demo-003".to_string()),
            establishment_id: DEMO_ESTABLISHMENT.to_string(),
            position: Position::Barman,
            contract_type: ContractType::Cdd,
            hourly_rate: Some(11.0),
            salary_text: None,
            start_date: today + chrono::Duration::days(7),
            end_date: None,
            shift_start_time: None,
            shift_end_time: None,
            urgency_level: None,
            nb_postes: 1,
            nb_postes_pourvus: 0,
            status: MissionStatus::Open,
            location_fuzzy: "Boulogne-Billancourt".to_string(),
        },
    ]
}

fn demo_talent() -> Talent {
    Talent {
        id: TalentId("talent-demo-001".to_string()),
        user_id: "user-talent-demo-001".to_string(),
        first_name: "Camille".to_string(),
        last_name: "Laurent".to_string(),
        phone: Some("+33 6 12 34 56 78".to_string()),
        position_types: BTreeSet::from([Position::Serveur]),
        contract_preferences: BTreeSet::from([ContractType::Extra]),
        min_hourly_rate: Some(12.0),
        preferred_departments: BTreeSet::from(["75".to_string(), "92".to_string()]),
        search_radius: 25,
        accepts_coupure: true,
        years_experience: 4,
    }
}
