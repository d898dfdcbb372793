use super::WorkflowGraph;
use std::fmt::{self, Write};

/// Formats a `WorkflowGraph` into a human-readable outline for debugging.
pub fn visualize_graph(graph: &WorkflowGraph, workflow_name: &str) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = write_graph(&mut output, graph, workflow_name);
    output
}

fn write_graph(output: &mut String, graph: &WorkflowGraph, workflow_name: &str) -> fmt::Result {
    writeln!(output, "======== WORKFLOW: {} ========", workflow_name)?;

    // 1. Nodes in execution order.
    writeln!(output, "\n--- NODES ---")?;
    for (i, node) in graph.nodes().iter().enumerate() {
        writeln!(
            output,
            "{:04}: {:<28} [{} v{}] @ ({}, {})",
            i,
            node.name,
            node.type_id,
            node.type_version,
            node.position.x,
            node.position.y
        )?;
    }

    // 2. Connections, rendered by name.
    if !graph.connections().is_empty() {
        writeln!(output, "\n--- CONNECTIONS ---")?;
        for connection in graph.connections() {
            let from = graph.node(connection.from).map_or("?", |n| n.name.as_str());
            let to = graph.node(connection.to).map_or("?", |n| n.name.as_str());
            writeln!(
                output,
                "{:<28} -> {:<28} (out {} -> in {})",
                from, to, connection.output_index, connection.input_index
            )?;
        }
    }

    writeln!(output, "\n================ END OF WORKFLOW ================")
}
