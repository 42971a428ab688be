use scoreline::{DomainError, Match, RecordsExt, ResultReport};

use crate::support::{player, League};

#[test]
fn report_before_kickoff() {
    let league = League::seed();
    let view = league.engine.get_report(league.fixture.id).unwrap();
    assert_eq!(view.final_score, "0-0");
    assert_eq!(view.match_result, "not finished");
    assert_eq!(view.top_scorer_in_match, "no goals yet");
    assert_eq!(view.home_team_total_wins, 0);
}

#[test]
fn tied_top_scorers_resolve_to_lowest_player_id() {
    let league = League::seed();
    assert!(league.striker.id < league.visitor.id);

    // visitor scores first, striker later; ordering of goals must not matter
    let report = ResultReport::new(1, 1)
        .goal(league.visitor.id, 3)
        .goal(league.striker.id, 90);
    league
        .engine
        .report_result(league.fixture.id, &report)
        .unwrap();

    let top = league
        .engine
        .aggregator()
        .top_scorer(league.fixture.id)
        .unwrap()
        .unwrap();
    assert_eq!(top.player_id, league.striker.id);
    assert_eq!(top.goals, 1);
    assert_eq!(
        league
            .engine
            .get_report(league.fixture.id)
            .unwrap()
            .top_scorer_in_match,
        "Marko Simic (1 goal)"
    );
}

#[test]
fn hat_trick_beats_lower_id() {
    let league = League::seed();
    let report = ResultReport::new(1, 3)
        .goal(league.striker.id, 1)
        .goal(league.visitor.id, 20)
        .goal(league.visitor.id, 40)
        .goal(league.visitor.id, 119);
    league
        .engine
        .report_result(league.fixture.id, &report)
        .unwrap();

    let view = league.engine.get_report(league.fixture.id).unwrap();
    assert_eq!(view.match_result, "away win");
    assert_eq!(view.top_scorer_in_match, "David da Silva (3 goals)");
    assert_eq!(view.away_team_total_wins, 1);
    assert_eq!(view.home_team_total_wins, 0);
}

#[test]
fn win_counts_match_a_direct_recount() {
    let league = League::seed();
    let (persija, persib, bali) = (league.home.id, league.away.id, league.neutral.id);
    let bali_forward = league.outsider.id;
    let persib_keeper = league
        .engine
        .roster()
        .create_player(player(persib, "Teja Paku Alam", scoreline::Position::Goalkeeper, 1))
        .unwrap()
        .id;

    // (home, away, home scorer, away scorer, home goals, away goals)
    let fixtures = [
        (persija, persib, league.striker.id, league.visitor.id, 2, 1),
        (persib, persija, league.visitor.id, league.winger.id, 0, 1),
        (bali, persija, bali_forward, league.striker.id, 3, 3),
        (persib, bali, persib_keeper, bali_forward, 1, 0),
        (bali, persib, bali_forward, league.visitor.id, 2, 0),
    ];

    for (home, away, home_scorer, away_scorer, home_goals, away_goals) in fixtures {
        let fixture = league.schedule(home, away);
        let mut report = ResultReport::new(home_goals, away_goals);
        for minute in 0..home_goals {
            report = report.goal(home_scorer, 5 + minute);
        }
        for minute in 0..away_goals {
            report = report.goal(away_scorer, 60 + minute);
        }
        league.engine.report_result(fixture.id, &report).unwrap();
    }
    // still scheduled: never counts
    league.schedule(persija, bali);

    let aggregator = league.engine.aggregator();
    for team in [persija, persib, bali] {
        assert_eq!(
            aggregator.count_wins(team).unwrap(),
            league.recount_wins(team),
            "team {team}"
        );
    }
    assert_eq!(aggregator.count_wins(persija).unwrap(), 2);
    assert_eq!(aggregator.count_wins(persib).unwrap(), 1);
    assert_eq!(aggregator.count_wins(bali).unwrap(), 1);
}

#[test]
fn deleted_records_stay_readable_in_reports() {
    let league = League::seed();
    let report = ResultReport::new(1, 0).goal(league.striker.id, 77);
    league
        .engine
        .report_result(league.fixture.id, &report)
        .unwrap();

    let roster = league.engine.roster();
    roster.delete_player(league.striker.id).unwrap();
    roster.delete_team(league.away.id).unwrap();

    let view = league.engine.get_report(league.fixture.id).unwrap();
    assert_eq!(view.away_team, "Persib");
    assert_eq!(view.top_scorer_in_match, "Marko Simic (1 goal)");
}

#[test]
fn deleted_matches_drop_out_of_win_counts() {
    let league = League::seed();
    let report = ResultReport::new(1, 0).goal(league.striker.id, 77);
    league
        .engine
        .report_result(league.fixture.id, &report)
        .unwrap();
    assert_eq!(league.engine.aggregator().count_wins(league.home.id).unwrap(), 1);

    league
        .store()
        .records::<Match>()
        .soft_delete(league.fixture.id)
        .unwrap();
    assert_eq!(league.engine.aggregator().count_wins(league.home.id).unwrap(), 0);
    assert_eq!(
        league.engine.get_report(league.fixture.id).unwrap_err(),
        DomainError::NotFound {
            entity: "match",
            id: league.fixture.id
        }
    );
}
