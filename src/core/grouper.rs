use crate::core::{BlockGroup, ContentBlock, ListKind};

struct OpenRun {
    kind: ListKind,
    blocks: Vec<ContentBlock>,
}

/// Groups consecutive list items of the same kind so they can share one list
/// container. Every other block passes through as `BlockGroup::Single`.
///
/// Concatenating the blocks of the returned groups yields the input unchanged.
pub fn group_blocks(blocks: Vec<ContentBlock>) -> Vec<BlockGroup> {
    let mut groups = Vec::with_capacity(blocks.len());
    let mut open: Option<OpenRun> = None;

    for block in blocks {
        match block.list_kind() {
            Some(kind) => match open.as_mut() {
                Some(run) if run.kind == kind => run.blocks.push(block),
                _ => {
                    close_run(&mut groups, open.take());
                    open = Some(OpenRun {
                        kind,
                        blocks: vec![block],
                    });
                }
            },
            None => {
                close_run(&mut groups, open.take());
                groups.push(BlockGroup::Single(block));
            }
        }
    }
    close_run(&mut groups, open);

    groups
}

fn close_run(groups: &mut Vec<BlockGroup>, run: Option<OpenRun>) {
    if let Some(run) = run {
        if !run.blocks.is_empty() {
            groups.push(BlockGroup::Run(run.kind, run.blocks));
        }
    }
}
